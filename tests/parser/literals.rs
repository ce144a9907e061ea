//! Integration tests for the literal parser

use hbnb_foundation::{ErrorKind, Fields, Value};
use hbnb_parser::{parse_literal, parse_map_literal};
use proptest::prelude::*;

#[test]
fn map_from_console_input() {
    let map = parse_map_literal("{'first_name': 'John', 'age': 89, 'ratio': 0.5}").unwrap();
    assert_eq!(map.get("first_name"), Some(&Value::from("John")));
    assert_eq!(map.get("age"), Some(&Value::Int(89)));
    assert_eq!(map.get("ratio"), Some(&Value::Float(0.5)));
}

#[test]
fn json_style_input_is_accepted() {
    let map = parse_map_literal(r#"{"ok": true, "none": null, "ids": [1, 2]}"#).unwrap();
    assert_eq!(map.get("ok"), Some(&Value::Bool(true)));
    assert!(map.get("none").unwrap().is_nil());
    assert_eq!(map.get("ids"), Some(&Value::from(vec![1, 2])));
}

#[test]
fn nothing_is_evaluated() {
    for text in [
        "{'a': __import__('os')}",
        "{'a': 1 + 1}",
        "{'a': b}",
        "{'a': lambda: 1}",
    ] {
        assert!(
            matches!(parse_literal(text).unwrap_err().kind, ErrorKind::Parse { .. }),
            "{text}"
        );
    }
}

#[test]
fn errors_carry_offsets() {
    let err = parse_literal("{'a': 1, 'b' 2}").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::Parse {
            message: "expected ':', found integer".into(),
            offset: 13
        }
    );
}

fn literal_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::btree_map("\\PC{0,6}", inner, 0..4)
                .prop_map(|m| Value::Map(m.into_iter().collect::<Fields>())),
        ]
    })
}

proptest! {
    #[test]
    fn rendered_values_parse_back(value in literal_value()) {
        let text = value.to_string();
        prop_assert_eq!(parse_literal(&text).unwrap(), value);
    }

    #[test]
    fn parse_never_panics(text in "\\PC{0,40}") {
        let _ = parse_literal(&text);
    }
}

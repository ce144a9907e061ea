//! Integration tests for the argument lexer

use hbnb_foundation::ErrorKind;
use hbnb_parser::{ArgToken, ArgumentLexer};
use proptest::prelude::*;

fn texts(input: &str) -> Vec<String> {
    ArgumentLexer::tokenize(input)
        .unwrap()
        .iter()
        .map(|t| t.text().to_string())
        .collect()
}

#[test]
fn update_with_quoted_value() {
    assert_eq!(
        texts(r#"User 49faff9a first_name "Betty Bar""#),
        ["User", "49faff9a", "first_name", "Betty Bar"]
    );
}

#[test]
fn single_quotes_are_literal() {
    assert_eq!(texts(r"User 1 note 'a \n b'"), ["User", "1", "note", r"a \n b"]);
}

#[test]
fn email_stays_whole() {
    assert_eq!(
        texts("User 1 email airbnb@mail.com"),
        ["User", "1", "email", "airbnb@mail.com"]
    );
}

#[test]
fn only_one_literal_is_recognized() {
    let tokens = ArgumentLexer::tokenize("Place 1 {'a': 1} [2]").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2], ArgToken::Map("{'a': 1}".to_string()));
    assert_eq!(tokens.iter().filter(|t| t.is_literal()).count(), 1);
}

#[test]
fn list_before_map_still_yields_map() {
    let tokens = ArgumentLexer::tokenize("Place 1 [x] {'a': 1}").unwrap();
    assert_eq!(tokens.last(), Some(&ArgToken::Map("{'a': 1}".to_string())));
    assert_eq!(tokens.len(), 4);
}

#[test]
fn unterminated_quotes_are_parse_errors() {
    for input in ["User 'abc", "User \"abc", "name \"a\\\""] {
        assert!(
            matches!(
                ArgumentLexer::tokenize(input).unwrap_err().kind,
                ErrorKind::Parse { .. }
            ),
            "{input}"
        );
    }
}

proptest! {
    #[test]
    fn plain_words_split_on_whitespace(words in proptest::collection::vec("[A-Za-z0-9_@-]{1,10}", 0..8)) {
        let input = words.join("  ");
        prop_assert_eq!(texts(&input), words);
    }

    #[test]
    fn double_quoted_words_keep_spaces(text in "[A-Za-z0-9 ]{0,20}") {
        let input = format!("User 1 name \"{text}\"");
        let tokens = texts(&input);
        prop_assert_eq!(tokens.len(), 4);
        prop_assert_eq!(&tokens[3], &text);
    }

    #[test]
    fn tokenize_never_panics(input in "\\PC{0,40}") {
        let _ = ArgumentLexer::tokenize(&input);
    }
}

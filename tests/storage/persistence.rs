//! Integration tests for JSON persistence

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use hbnb_foundation::{ErrorKind, Fields, Kind, Value};
use hbnb_storage::{Entity, FileStorage, Registry, from_json, load_from_file, save_to_file, to_json};
use im::Vector;
use proptest::prelude::*;

fn temp_path() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.json");
    (dir, path)
}

#[test]
fn file_is_keyed_by_composite_key() {
    let mut registry = Registry::new();
    let key = registry.create(Kind::User);

    let json: serde_json::Value = serde_json::from_str(&to_json(&registry).unwrap()).unwrap();
    let record = &json[key.to_string()];
    assert_eq!(record["__class__"], "User");
    assert_eq!(record["id"], key.id.as_str());
    assert_eq!(record["email"], "");
    assert!(record["created_at"].as_str().unwrap().contains('T'));
}

#[test]
fn reads_files_written_elsewhere() {
    let json = r#"{
        "BaseModel.5f2f": {
            "__class__": "BaseModel",
            "id": "5f2f",
            "created_at": "2017-09-28T21:03:54.052298",
            "updated_at": "2017-09-28T21:05:54.119427",
            "my_number": 89,
            "name": "My First Model",
            "ratio": 0.5,
            "tags": ["x", 1],
            "extra": {"nested": null}
        }
    }"#;
    let registry = from_json(json).unwrap();
    let entity = registry.iter().next().unwrap();

    assert_eq!(entity.kind(), Kind::BaseModel);
    assert_eq!(entity.get("my_number"), Some(&Value::Int(89)));
    assert_eq!(entity.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(entity.get("tags").and_then(Value::as_list).map(Vector::len), Some(2));
    assert!(entity.get("extra").and_then(Value::as_map).unwrap()["nested"].is_nil());
    assert!(entity.updated_at() > entity.created_at());
}

#[test]
fn missing_timestamp_is_corrupt() {
    let json = r#"{"User.1": {"__class__": "User", "id": "1", "created_at": "2024-01-01T00:00:00"}}"#;
    assert!(matches!(from_json(json).unwrap_err().kind, ErrorKind::CorruptStore(_)));
}

#[test]
fn invalid_timestamp_is_corrupt() {
    let json = r#"{"User.1": {"__class__": "User", "id": "1",
        "created_at": "soon", "updated_at": "2024-01-01T00:00:00"}}"#;
    assert!(matches!(from_json(json).unwrap_err().kind, ErrorKind::CorruptStore(_)));
}

#[test]
fn top_level_must_be_an_object() {
    assert!(matches!(from_json("[]").unwrap_err().kind, ErrorKind::CorruptStore(_)));
}

#[test]
fn save_overwrites_whole_file() {
    let (_dir, path) = temp_path();
    let mut registry = Registry::new();
    let first = registry.create(Kind::City);
    save_to_file(&registry, &path).unwrap();

    registry.remove(&first);
    registry.create(Kind::State);
    save_to_file(&registry, &path).unwrap();

    let reloaded = load_from_file(&path).unwrap();
    assert_eq!(reloaded, registry);
    assert_eq!(reloaded.count(Kind::City), 0);
}

#[test]
fn empty_registry_saves_as_empty_object() {
    let (_dir, path) = temp_path();
    save_to_file(&Registry::new(), &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
}

#[test]
fn corrupt_file_error_names_the_file() {
    let (_dir, path) = temp_path();
    fs::write(&path, "{ not json").unwrap();
    let err = FileStorage::open(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CorruptStore(_)));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some(path.display().to_string().as_str()));
    assert_eq!(context.line, Some(1));
}

#[test]
fn storage_survives_reopen() {
    let (_dir, path) = temp_path();
    let mut storage = FileStorage::new(&path);
    let key = storage.registry_mut().create(Kind::Place);
    storage.save().unwrap();
    let before = storage.registry().get(&key).unwrap().to_string();

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.registry().get(&key).unwrap().to_string(), before);
}

#[test]
fn discriminator_cannot_be_shadowed_by_a_field() {
    let (_dir, path) = temp_path();
    let mut storage = FileStorage::new(&path);
    let key = storage.registry_mut().create(Kind::User);
    let entity = storage.registry_mut().get_mut(&key).unwrap();
    assert!(!entity.set("__class__", Value::from("Ghost")));
    assert!(!entity.set("__class__", Value::Int(1)));
    storage.save().unwrap();

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.registry(), storage.registry());
}

#[test]
fn stored_fields_named_like_the_discriminator_are_dropped() {
    let mut fields = Fields::new();
    fields.insert("__class__".to_string(), Value::from("Ghost"));
    fields.insert("name".to_string(), Value::from("Ohio"));
    let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let entity = Entity::from_parts(Kind::State, "s1".to_string(), ts, ts, fields);
    assert_eq!(entity.get("__class__"), None);

    let (_dir, path) = temp_path();
    let mut registry = Registry::new();
    registry.insert(entity).unwrap();
    save_to_file(&registry, &path).unwrap();
    assert_eq!(load_from_file(&path).unwrap(), registry);
}

// =============================================================================
// Round-trip property
// =============================================================================

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..4_000_000_000, 0u32..1_000_000).prop_map(|(secs, micros)| {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(secs)
            + chrono::Duration::microseconds(i64::from(micros))
    })
}

fn field_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-4_000_000i32..4_000_000).prop_map(|n| Value::Float(f64::from(n) / 8.0)),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Map(m.into_iter().collect())),
        ]
    })
}

fn entity() -> impl Strategy<Value = Entity> {
    (
        proptest::sample::select(Kind::ALL.to_vec()),
        "[a-f0-9-]{1,36}",
        timestamp(),
        timestamp(),
        proptest::collection::btree_map("[a-z_]{1,10}", field_value(), 0..6),
    )
        .prop_map(|(kind, id, a, b, fields)| {
            let fields: Fields = fields.into_iter().collect();
            Entity::from_parts(kind, id, a.min(b), a.max(b), fields)
        })
}

proptest! {
    #[test]
    fn entities_round_trip(entity in entity()) {
        let mut registry = Registry::new();
        registry.insert(entity.clone()).unwrap();

        let restored = from_json(&to_json(&registry).unwrap()).unwrap();
        let back = restored.get(&entity.key()).unwrap();
        prop_assert_eq!(back, &entity);
        prop_assert_eq!(back.to_string(), entity.to_string());
    }
}

//! Integration tests for console commands

use hbnb_foundation::{ErrorKind, Kind, Value};
use hbnb_runtime::Console;
use hbnb_storage::{FileStorage, ObjectKey};
use proptest::prelude::*;

struct Fixture {
    _dir: tempfile::TempDir,
    console: Console,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let console = Console::new(FileStorage::new(dir.path().join("file.json")));
        Self { _dir: dir, console }
    }

    fn run(&mut self, line: &str) -> Vec<String> {
        self.console.respond(line).lines
    }

    fn create(&mut self, kind: &str) -> String {
        let mut lines = self.run(&format!("create {kind}"));
        assert_eq!(lines.len(), 1);
        lines.remove(0)
    }

    fn field(&self, kind: Kind, id: &str, name: &str) -> Option<Value> {
        self.console
            .registry()
            .get(&ObjectKey::new(kind, id))
            .and_then(|e| e.get(name).cloned())
    }
}

// =============================================================================
// Validation order
// =============================================================================

#[test]
fn class_is_checked_before_id() {
    let mut fx = Fixture::new();
    for verb in ["show", "destroy", "update"] {
        assert_eq!(fx.run(&format!("{verb} UnknownKind")), ["** class doesn't exist **"]);
        assert_eq!(fx.run(verb), ["** class name missing **"]);
        assert_eq!(fx.run(&format!("{verb} User")), ["** instance id missing **"]);
        assert_eq!(fx.run(&format!("{verb} User nope")), ["** no instance found **"]);
    }
}

#[test]
fn dotted_validation_matches_canonical() {
    let mut fx = Fixture::new();
    assert_eq!(fx.run("Ghost.show(\"1\")"), fx.run("show Ghost 1"));
    assert_eq!(fx.run("User.show()"), ["** instance id missing **"]);
    assert_eq!(fx.run("User.destroy(\"x\")"), ["** no instance found **"]);
    assert_eq!(fx.run(".show(\"1\")"), ["** class name missing **"]);
}

#[test]
fn update_pair_checks() {
    let mut fx = Fixture::new();
    let id = fx.create("User");
    assert_eq!(fx.run(&format!("update User {id}")), ["** attribute name missing **"]);
    assert_eq!(fx.run(&format!("update User {id} age")), ["** value missing **"]);
}

#[test]
fn failed_commands_change_nothing() {
    let mut fx = Fixture::new();
    let id = fx.create("User");
    let before = fx.console.registry().clone();

    fx.run(&format!("update User {id} age"));
    fx.run(&format!("update User {id} {{'age': oops}}"));
    fx.run("create Nope");
    fx.run(&format!("destroy Place {id}"));

    assert_eq!(fx.console.registry(), &before);
}

// =============================================================================
// Verbs
// =============================================================================

#[test]
fn dual_syntax_show_is_identical() {
    let mut fx = Fixture::new();
    let id = fx.create("BaseModel");
    let canonical = fx.run(&format!("show BaseModel {id}"));
    let dotted = fx.run(&format!("BaseModel.show(\"{id}\")"));
    assert_eq!(canonical, dotted);
    assert!(canonical[0].starts_with(&format!("[BaseModel] ({id})")));
}

#[test]
fn update_type_asymmetry() {
    let mut fx = Fixture::new();
    let id = fx.create("User");

    fx.run(&format!("update User {id} age 5"));
    assert_eq!(fx.field(Kind::User, &id, "age"), Some(Value::from("5")));

    fx.run(&format!("update User {id} {{\"age\": 5}}"));
    assert_eq!(fx.field(Kind::User, &id, "age"), Some(Value::Int(5)));
}

#[test]
fn dotted_update_forms() {
    let mut fx = Fixture::new();
    let id = fx.create("Place");

    fx.run(&format!("Place.update(\"{id}\", \"name\", \"Loft\")"));
    fx.run(&format!("Place.update(\"{id}\", {{'max_guest': 4, 'latitude': 48.85}})"));

    assert_eq!(fx.field(Kind::Place, &id, "name"), Some(Value::from("Loft")));
    assert_eq!(fx.field(Kind::Place, &id, "max_guest"), Some(Value::Int(4)));
    assert_eq!(fx.field(Kind::Place, &id, "latitude"), Some(Value::Float(48.85)));
}

#[test]
fn update_refreshes_updated_at() {
    let mut fx = Fixture::new();
    let id = fx.create("Review");
    let key = ObjectKey::new(Kind::Review, &id);
    let created = fx.console.registry().get(&key).unwrap().created_at();

    fx.run(&format!("update Review {id} text \"Great stay\""));
    let entity = fx.console.registry().get(&key).unwrap();
    assert_eq!(entity.created_at(), created);
    assert!(entity.updated_at() >= created);
}

#[test]
fn empty_store_all_prints_nothing() {
    let mut fx = Fixture::new();
    assert!(fx.run("all").is_empty());
    assert!(fx.run("User.all()").is_empty());
}

#[test]
fn all_filters_by_kind() {
    let mut fx = Fixture::new();
    fx.create("User");
    fx.create("City");
    fx.create("City");

    let cities = fx.run("City.all()");
    assert_eq!(cities.len(), 2);
    assert!(cities.iter().all(|line| line.starts_with("[City] (")));
    assert_eq!(fx.run("all").len(), 3);
}

#[test]
fn count_in_both_syntaxes() {
    let mut fx = Fixture::new();
    fx.create("State");
    fx.create("State");
    assert_eq!(fx.run("count State"), ["2"]);
    assert_eq!(fx.run("State.count()"), ["2"]);
    assert_eq!(fx.run("Amenity.count()"), ["0"]);
}

#[test]
fn deletion_is_final() {
    let mut fx = Fixture::new();
    let id = fx.create("Amenity");
    assert!(fx.run(&format!("destroy Amenity {id}")).is_empty());
    assert_eq!(fx.run(&format!("show Amenity {id}")), ["** no instance found **"]);
    assert_eq!(
        fx.run(&format!("update Amenity {id} name Wifi")),
        ["** no instance found **"]
    );
}

#[test]
fn unknown_syntax_reports_line() {
    let mut fx = Fixture::new();
    assert_eq!(fx.run("all.User"), ["*** Unknown syntax: all.User"]);
    assert_eq!(fx.run("User.jump()"), ["*** Unknown syntax: User.jump()"]);
}

#[test]
fn execute_exposes_error_kinds() {
    let mut fx = Fixture::new();
    assert_eq!(
        fx.console.execute("update Ghost").unwrap_err().kind,
        ErrorKind::KindUnknown("Ghost".into())
    );
}

fn kind_name() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(Kind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn creates_are_counted(kinds in proptest::collection::vec(kind_name(), 1..12)) {
        let mut fx = Fixture::new();
        let ids: Vec<String> = kinds.iter().map(|k| fx.create(k)).collect();

        prop_assert_eq!(fx.console.registry().len(), kinds.len());
        prop_assert_eq!(fx.run("all").len(), kinds.len());
        for kind in Kind::ALL {
            let expected = kinds.iter().filter(|k| **k == kind.name()).count();
            prop_assert_eq!(fx.run(&format!("count {kind}")), vec![expected.to_string()]);
        }
        for (kind, id) in kinds.iter().zip(&ids) {
            prop_assert_eq!(
                fx.run(&format!("show {kind} {id}")),
                fx.run(&format!("{kind}.show(\"{id}\")"))
            );
        }
    }
}

//! Command dispatch.
//!
//! [`Console`] validates a parsed command against the registry and the kind
//! catalog, runs it, and persists the registry after every mutation. All
//! validation happens before anything is changed; a failed save rolls the
//! registry back to its state before the command.

use std::path::PathBuf;

use hbnb_foundation::{Error, Kind, Result, Value};
use hbnb_parser::{ArgToken, Command, Verb, parse_line, parse_map_literal};
use hbnb_storage::entity::is_reserved;
use hbnb_storage::{FileStorage, ObjectKey, Registry};
use tracing::{debug, warn};

/// Output of one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// Lines to print, in order.
    pub lines: Vec<String>,
    /// Whether the session should end.
    pub exit: bool,
}

impl Response {
    /// A response that prints nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A response that prints one line.
    #[must_use]
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            exit: false,
        }
    }

    /// A response that prints several lines.
    #[must_use]
    pub fn lines(lines: Vec<String>) -> Self {
        Self { lines, exit: false }
    }

    /// A response that ends the session.
    #[must_use]
    pub fn exit() -> Self {
        Self {
            lines: Vec::new(),
            exit: true,
        }
    }
}

/// The command interpreter bound to one store.
#[derive(Debug)]
pub struct Console {
    storage: FileStorage,
}

impl Console {
    /// Creates a console over an already opened store.
    #[must_use]
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    /// Opens the store at `path` and creates a console over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        FileStorage::open(path).map(Self::new)
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        self.storage.registry()
    }

    /// Runs one input line and returns its output, rendering any error as
    /// its single diagnostic line.
    pub fn respond(&mut self, line: &str) -> Response {
        match self.execute(line) {
            Ok(response) => response,
            Err(e) => {
                if e.is_command_error() {
                    debug!(error = ?e.kind, "command rejected");
                } else {
                    warn!(error = %e, "command failed");
                }
                Response::line(e.to_string())
            }
        }
    }

    /// Runs one input line.
    ///
    /// # Errors
    ///
    /// Returns the first failed validation, a literal parse error, or a
    /// storage error if persisting the change failed.
    pub fn execute(&mut self, line: &str) -> Result<Response> {
        let Some(command) = parse_line(line)? else {
            return Ok(Response::empty());
        };
        debug!(verb = %command.verb, args = command.args.len(), "dispatching");

        match command.verb {
            Verb::Create => self.create(&command),
            Verb::Show => self.show(&command),
            Verb::Destroy => self.destroy(&command),
            Verb::All => self.all(&command),
            Verb::Update => self.update(&command),
            Verb::Count => self.count(&command),
            Verb::Help => Ok(help(&command)),
            Verb::Quit | Verb::Eof => Ok(Response::exit()),
        }
    }

    fn create(&mut self, command: &Command) -> Result<Response> {
        let kind = require_kind(command)?;
        let key = self.commit(|registry| registry.create(kind))?;
        Ok(Response::line(key.id))
    }

    fn show(&self, command: &Command) -> Result<Response> {
        let key = self.require_key(command)?;
        let entity = self
            .registry()
            .get(&key)
            .ok_or_else(|| Error::instance_not_found(key.to_string()))?;
        Ok(Response::line(entity.to_string()))
    }

    fn destroy(&mut self, command: &Command) -> Result<Response> {
        let key = self.require_key(command)?;
        self.commit(|registry| registry.remove(&key))?;
        Ok(Response::empty())
    }

    fn all(&self, command: &Command) -> Result<Response> {
        let filter = command.arg(0).map(lookup_kind).transpose()?;
        let lines = self
            .registry()
            .iter()
            .filter(|entity| filter.is_none_or(|kind| entity.kind() == kind))
            .map(ToString::to_string)
            .collect();
        Ok(Response::lines(lines))
    }

    fn count(&self, command: &Command) -> Result<Response> {
        let kind = require_kind(command)?;
        Ok(Response::line(self.registry().count(kind).to_string()))
    }

    fn update(&mut self, command: &Command) -> Result<Response> {
        let key = self.require_key(command)?;
        let assignments = assignments(command)?;

        let assignments: Vec<(String, Value)> = assignments
            .into_iter()
            .filter(|(name, _)| {
                let reserved = is_reserved(name);
                if reserved {
                    warn!(field = %name, key = %key, "ignoring update of reserved field");
                }
                !reserved
            })
            .collect();
        if assignments.is_empty() {
            return Ok(Response::empty());
        }

        self.commit(|registry| {
            if let Some(entity) = registry.get_mut(&key) {
                for (name, value) in assignments {
                    entity.set(name, value);
                }
                entity.touch();
            }
        })?;
        Ok(Response::empty())
    }

    /// Checks kind presence, kind membership, id presence, and existence, in
    /// that order.
    fn require_key(&self, command: &Command) -> Result<ObjectKey> {
        let kind = require_kind(command)?;
        let id = command.arg(1).ok_or_else(Error::identifier_missing)?;
        let key = ObjectKey::new(kind, id);
        if self.registry().contains(&key) {
            Ok(key)
        } else {
            Err(Error::instance_not_found(key.to_string()))
        }
    }

    /// Applies `mutate` to the registry and saves, restoring the previous
    /// registry if the save fails.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Registry) -> T) -> Result<T> {
        let snapshot = self.storage.registry().clone();
        let output = mutate(self.storage.registry_mut());
        if let Err(e) = self.storage.save() {
            self.storage.restore(snapshot);
            return Err(e);
        }
        Ok(output)
    }
}

fn lookup_kind(name: &str) -> Result<Kind> {
    Kind::from_name(name).ok_or_else(|| Error::kind_unknown(name))
}

fn require_kind(command: &Command) -> Result<Kind> {
    command
        .arg(0)
        .ok_or_else(Error::kind_missing)
        .and_then(lookup_kind)
}

/// Reads the field assignments of an update, after kind and id.
///
/// A map literal yields every entry with its parsed type. Otherwise the next
/// two tokens are a field name and a value, and the value is stored as text.
fn assignments(command: &Command) -> Result<Vec<(String, Value)>> {
    match command.args.get(2) {
        None => Err(Error::field_name_missing()),
        Some(ArgToken::Map(text)) => {
            let map = parse_map_literal(text)?;
            if map.is_empty() {
                return Err(Error::field_name_missing());
            }
            Ok(map.into_iter().collect())
        }
        Some(name) => {
            let value = command.arg(3).ok_or_else(Error::field_value_missing)?;
            Ok(vec![(name.text().to_string(), Value::from(value))])
        }
    }
}

/// Builds the output of `help` and `help <topic>`.
fn help(command: &Command) -> Response {
    match command.arg(0) {
        None => {
            let header = "Documented commands (type help <topic>):";
            let names: Vec<&str> = Verb::ALL.iter().map(|verb| verb.name()).collect();
            Response::lines(vec![
                String::new(),
                header.to_string(),
                "=".repeat(header.len()),
                names.join("  "),
                String::new(),
            ])
        }
        Some(topic) => match Verb::from_word(topic) {
            Some(verb) => Response::line(verb.usage()),
            None => Response::line(format!("*** No help on {topic}")),
        },
    }
}

//! Registry serialization and deserialization using JSON.
//!
//! The file is a single object keyed by `"Kind.id"`. Each value holds every
//! field of the entity plus a `__class__` discriminator naming its kind:
//!
//! ```json
//! {
//!   "User.1b7c...": {
//!     "__class__": "User",
//!     "id": "1b7c...",
//!     "created_at": "2024-01-02T03:04:05.000006",
//!     "updated_at": "2024-01-02T03:04:05.000006",
//!     "email": ""
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use hbnb_foundation::{Error, ErrorContext, ErrorKind, Kind, Result, Value};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::registry::{ObjectKey, Registry};

/// Field name of the kind discriminator.
pub const CLASS_FIELD: &str = "__class__";

/// Serde adapter for the textual timestamp format.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::entity::{format_timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{text}': {e}")))
    }
}

/// On-disk shape of one entity.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "__class__")]
    class: String,
    id: String,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    updated_at: NaiveDateTime,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl StoredRecord {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            class: entity.kind().name().to_string(),
            id: entity.id().to_string(),
            created_at: entity.created_at(),
            updated_at: entity.updated_at(),
            fields: entity
                .fields()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Rebuilds the typed entity, checking it against the key it was stored
    /// under.
    fn into_entity(self, key: &str) -> Result<Entity> {
        let kind = Kind::from_name(&self.class).ok_or_else(|| {
            Error::corrupt(format!("entry '{key}' has unknown class '{}'", self.class))
        })?;
        let expected = ObjectKey::new(kind, self.id.clone()).to_string();
        if expected != key {
            return Err(Error::corrupt(format!(
                "entry '{key}' does not match its contents ('{expected}')"
            )));
        }
        Ok(Entity::from_parts(
            kind,
            self.id,
            self.created_at,
            self.updated_at,
            self.fields.into_iter().collect(),
        ))
    }
}

/// Serializes a registry to JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(registry: &Registry) -> Result<String> {
    let records: BTreeMap<String, StoredRecord> = registry
        .iter()
        .map(|entity| (entity.key().to_string(), StoredRecord::from_entity(entity)))
        .collect();
    serde_json::to_string_pretty(&records)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a registry from JSON text.
///
/// # Errors
///
/// Returns a `CorruptStore` error if the text is not valid JSON, an entry
/// names an unknown kind, or an entry's key disagrees with its contents.
pub fn from_json(text: &str) -> Result<Registry> {
    let records: BTreeMap<String, StoredRecord> = serde_json::from_str(text).map_err(|e| {
        Error::corrupt(e.to_string())
            .with_context(ErrorContext::new().with_position(e.line(), e.column()))
    })?;

    let mut registry = Registry::new();
    for (key, record) in records {
        registry.insert(record.into_entity(&key)?)?;
    }
    Ok(registry)
}

/// Returns the sibling path used while a save is in flight.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Saves a registry to a file.
///
/// The JSON is written to a sibling staging file which is then renamed over
/// `path`, so the backing file is always either the old or the new snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be created, written, or renamed, or
/// if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(registry: &Registry, path: P) -> Result<()> {
    let path = path.as_ref();
    let staging = staging_path(path);
    let json = to_json(registry)?;

    let file = File::create(&staging).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create file '{}': {e}",
            staging.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.flush())
        .and_then(|()| writer.get_ref().sync_all())
        .map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to write to file '{}': {e}",
                staging.display()
            )))
        })?;
    drop(writer);

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        Error::new(ErrorKind::IoError(format!(
            "failed to replace file '{}': {e}",
            path.display()
        )))
    })
}

/// Loads a registry from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are corrupt.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Registry> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    from_json(&text).map_err(|mut e| {
        let context = e.context.take().unwrap_or_default();
        e.with_context(context.with_source(path.display().to_string()))
    })
}

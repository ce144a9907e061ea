//! Entity records and their lifecycle timestamps.
//!
//! An [`Entity`] is a flat attribute bag: three base fields shared by every
//! kind plus a map of extra fields. Kinds differ only in which extra fields
//! exist when a record is created.

use std::fmt;

use chrono::{Local, NaiveDateTime, SubsecRound};
use hbnb_foundation::value::write_quoted;
use hbnb_foundation::{Fields, Kind, Value};
use uuid::Uuid;

use crate::registry::ObjectKey;

/// Textual timestamp format used for persistence and display.
///
/// Sortable, timezone-naive, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format accepted when reading timestamps back (any fractional precision).
pub const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Field names owned by the entity itself or by the file format's kind
/// discriminator; they never live in the field map.
pub const RESERVED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// Returns the current local time at the precision the file format keeps.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Renders a timestamp in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp written by [`format_timestamp`] or any ISO-8601-like
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` text.
///
/// # Errors
///
/// Returns the underlying chrono error if the text does not match.
pub fn parse_timestamp(text: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_PARSE_FORMAT)
}

/// Returns true if `name` is a base field or the kind discriminator.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// A stored record.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    kind: Kind,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    fields: Fields,
}

impl Entity {
    /// Creates a new entity of `kind` with a fresh identifier, current
    /// timestamps and the kind's default fields.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        let ts = now();
        Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: ts,
            updated_at: ts,
            fields: kind.defaults(),
        }
    }

    /// Rebuilds an entity from stored parts.
    ///
    /// Reserved names in `fields` are dropped, and `updated_at` is clamped so
    /// it never precedes `created_at`.
    #[must_use]
    pub fn from_parts(
        kind: Kind,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
        fields: Fields,
    ) -> Self {
        let fields = fields
            .into_iter()
            .filter(|(name, _)| !is_reserved(name))
            .collect();
        Self {
            kind,
            id,
            created_at,
            updated_at: updated_at.max(created_at),
            fields,
        }
    }

    /// Returns the kind of this entity.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the composite registry key.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.kind, self.id.clone())
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Returns the extra fields.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Gets an extra field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets an extra field.
    ///
    /// Returns `false` without changing anything if `name` is reserved.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if is_reserved(&name) {
            return false;
        }
        self.fields.insert(name, value);
        true
    }

    /// Refreshes `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }
}

impl fmt::Display for Entity {
    /// Canonical string form: `[Kind] (id) <{field map}>`.
    ///
    /// Base fields come first, then extra fields in name order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) <{{'id': ", self.kind, self.id)?;
        write_quoted(f, &self.id)?;
        write!(
            f,
            ", 'created_at': '{}', 'updated_at': '{}'",
            format_timestamp(&self.created_at),
            format_timestamp(&self.updated_at)
        )?;
        for (name, value) in &self.fields {
            write!(f, ", ")?;
            write_quoted(f, name)?;
            write!(f, ": {value}")?;
        }
        write!(f, "}}>")
    }
}

//! The in-memory object registry.
//!
//! Maps composite keys (kind + identifier) to entities. The map is a
//! persistent `im::OrdMap`, so taking a snapshot before a mutation is O(1)
//! and iteration order is deterministic (by kind, then identifier).

use std::fmt;
use std::str::FromStr;

use hbnb_foundation::{Error, ErrorKind, Kind, Result};
use im::OrdMap;

use crate::entity::Entity;

/// Composite key addressing one entity: `Kind.id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    /// Kind of the entity.
    pub kind: Kind,
    /// Identifier of the entity.
    pub id: String,
}

impl ObjectKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(kind: Kind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.id)
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, id) = s
            .split_once('.')
            .ok_or_else(|| Error::corrupt(format!("malformed key '{s}'")))?;
        let kind = Kind::from_name(kind).ok_or_else(|| Error::kind_unknown(kind))?;
        if id.is_empty() {
            return Err(Error::corrupt(format!("malformed key '{s}'")));
        }
        Ok(Self::new(kind, id))
    }
}

/// The authoritative collection of entities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    objects: OrdMap<ObjectKey, Entity>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if there are no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Creates and inserts a new entity of `kind`, returning its key.
    ///
    /// A freshly generated identifier that collides with an existing one is
    /// discarded and regenerated.
    pub fn create(&mut self, kind: Kind) -> ObjectKey {
        loop {
            let entity = Entity::new(kind);
            let key = entity.key();
            if !self.objects.contains_key(&key) {
                self.objects.insert(key.clone(), entity);
                return key;
            }
        }
    }

    /// Inserts an existing entity.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity with the same key is already present.
    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        let key = entity.key();
        if self.objects.contains_key(&key) {
            return Err(Error::new(ErrorKind::Internal(format!(
                "duplicate key {key}"
            ))));
        }
        self.objects.insert(key, entity);
        Ok(())
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Gets an entity by key.
    #[must_use]
    pub fn get(&self, key: &ObjectKey) -> Option<&Entity> {
        self.objects.get(key)
    }

    /// Gets a mutable entity by key.
    pub fn get_mut(&mut self, key: &ObjectKey) -> Option<&mut Entity> {
        self.objects.get_mut(key)
    }

    /// Removes an entity, returning it if it was present.
    pub fn remove(&mut self, key: &ObjectKey) -> Option<Entity> {
        self.objects.remove(key)
    }

    /// Iterates over every entity in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.objects.values()
    }

    /// Iterates over the entities of one kind in identifier order.
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &Entity> {
        self.objects
            .iter()
            .filter(move |(key, _)| key.kind == kind)
            .map(|(_, entity)| entity)
    }

    /// Counts the entities of one kind.
    #[must_use]
    pub fn count(&self, kind: Kind) -> usize {
        self.of_kind(kind).count()
    }
}

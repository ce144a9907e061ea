//! File-backed object storage.
//!
//! [`FileStorage`] owns the [`Registry`] for the lifetime of a session and
//! the path of the file it is persisted to. Nothing here is global: tests can
//! open as many independent stores as they like.

use std::path::{Path, PathBuf};

use hbnb_foundation::Result;
use tracing::{debug, info};

use crate::registry::Registry;
use crate::serialize::{load_from_file, save_to_file};

/// Default backing file name.
pub const DEFAULT_FILE: &str = "file.json";

/// The registry together with its backing file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    registry: Registry,
}

impl FileStorage {
    /// Creates an empty store backed by `path` without reading it.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            registry: Registry::new(),
        }
    }

    /// Creates a store backed by `path` and reloads it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or understood.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut storage = Self::new(path);
        storage.reload()?;
        Ok(storage)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry for mutation.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Replaces the registry wholesale (used to roll back a failed command).
    pub fn restore(&mut self, snapshot: Registry) {
        self.registry = snapshot;
    }

    /// Writes the whole registry to the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self) -> Result<()> {
        save_to_file(&self.registry, &self.path)?;
        debug!(
            path = %self.path.display(),
            objects = self.registry.len(),
            "saved registry"
        );
        Ok(())
    }

    /// Replaces the registry with the contents of the backing file.
    ///
    /// A missing file is not an error and leaves the registry as it is. On
    /// any other failure the current registry is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or understood.
    pub fn reload(&mut self) -> Result<()> {
        if !self.path.is_file() {
            debug!(path = %self.path.display(), "no backing file, starting empty");
            return Ok(());
        }
        self.registry = load_from_file(&self.path)?;
        info!(
            path = %self.path.display(),
            objects = self.registry.len(),
            "reloaded registry"
        );
        Ok(())
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

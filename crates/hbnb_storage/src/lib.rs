//! Entity storage and persistence for hbnb.
//!
//! This crate provides:
//! - [`Entity`] - A record with base fields and kind-specific extra fields
//! - [`Registry`] - The in-memory mapping from composite key to entity
//! - [`FileStorage`] - The registry bound to its JSON backing file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod registry;
pub mod serialize;
pub mod store;

pub use entity::{Entity, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
pub use registry::{ObjectKey, Registry};
pub use serialize::{from_json, load_from_file, save_to_file, to_json};
pub use store::{DEFAULT_FILE, FileStorage};

//! hbnb - Line-oriented command interpreter over a file-backed object store
//!
//! This crate re-exports all layers of the hbnb system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: hbnb_runtime    - Console dispatcher, REPL, CLI, config, logging
//! Layer 2: hbnb_parser     - Argument lexer, literal parser, syntax normalizer
//! Layer 1: hbnb_storage    - Entities, registry, JSON persistence
//! Layer 0: hbnb_foundation - Core types (Value, Kind, Error)
//! ```

pub use hbnb_foundation as foundation;
pub use hbnb_parser as parser;
pub use hbnb_runtime as runtime;
pub use hbnb_storage as storage;

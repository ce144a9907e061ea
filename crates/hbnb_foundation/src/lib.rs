//! Core types for hbnb.
//!
//! This crate provides:
//! - [`Value`] - The field value type stored on every entity
//! - [`Kind`] - The closed catalog of record kinds
//! - [`Error`] - Error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod kind;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind};
pub use kind::Kind;
pub use value::{Fields, Value};

/// Result type alias using the hbnb error type.
pub type Result<T> = std::result::Result<T, Error>;

//! Command dispatcher, REPL, and CLI for hbnb.
//!
//! This crate provides:
//! - [`Console`] - Validates and executes commands against a store
//! - [`Repl`] - Interactive read-eval-print loop
//! - [`Config`] - Settings from defaults, environment, and flags
//! - [`logging`] - Diagnostic logging to stderr

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod console;
pub mod editor;
pub mod logging;
pub mod repl;

pub use config::{Config, ConfigError};
pub use console::{Console, Response};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{PROMPT, Repl};

//! Command-line parsing for the hbnb console.
//!
//! This crate turns one line of console input into a [`Command`]: a verb and
//! its argument tokens.
//!
//! # Architecture
//!
//! ```text
//! "User.update(\"38f2\", {'age': 89})"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SYNTAX          │  → "update User \"38f2\", {'age': 89}"
//! │ NORMALIZER      │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ARGUMENT        │  → [Word(User), Word(38f2), Map({'age': 89})]
//! │ LEXER           │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ LITERAL         │  → {'age': 89}   (on demand, by the dispatcher)
//! │ PARSER          │
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Shell-style argument splitting with a trailing literal
//! - [`syntax`] - Dotted `Kind.verb(...)` rewriting
//! - [`lexer`] - Tokens of list and map literals
//! - [`literal`] - Recursive-descent literal parser producing [`Value`](hbnb_foundation::Value)s
//! - [`command`] - Verbs and parsed commands
//! - [`parser`] - The line parsing pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod syntax;
pub mod tokenizer;

pub use command::{Command, Verb};
pub use literal::{parse_literal, parse_map_literal};
pub use parser::parse_line;
pub use syntax::normalize;
pub use tokenizer::{ArgToken, ArgumentLexer};

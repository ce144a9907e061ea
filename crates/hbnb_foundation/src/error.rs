//! Error types for the hbnb system.
//!
//! Uses `thiserror` for ergonomic error definition. The `Display` text of the
//! command-level kinds is exactly the diagnostic line the console prints.

use std::fmt;

use thiserror::Error;

/// The main error type for hbnb operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a missing kind error.
    #[must_use]
    pub fn kind_missing() -> Self {
        Self::new(ErrorKind::KindMissing)
    }

    /// Creates an unknown kind error.
    #[must_use]
    pub fn kind_unknown(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::KindUnknown(name.into()))
    }

    /// Creates a missing identifier error.
    #[must_use]
    pub fn identifier_missing() -> Self {
        Self::new(ErrorKind::IdentifierMissing)
    }

    /// Creates an instance not found error for a composite key.
    #[must_use]
    pub fn instance_not_found(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::InstanceNotFound(key.into()))
    }

    /// Creates a missing field name error.
    #[must_use]
    pub fn field_name_missing() -> Self {
        Self::new(ErrorKind::FieldNameMissing)
    }

    /// Creates a missing field value error.
    #[must_use]
    pub fn field_value_missing() -> Self {
        Self::new(ErrorKind::FieldValueMissing)
    }

    /// Creates an unrecognized command error.
    #[must_use]
    pub fn unrecognized(line: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedCommand(line.into()))
    }

    /// Creates a literal parse error at a byte offset.
    #[must_use]
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            offset,
        })
    }

    /// Creates a corrupt store error.
    #[must_use]
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CorruptStore(message.into()))
    }

    /// Returns true for errors that abort only the current command.
    ///
    /// Storage errors are recoverable at the prompt too, but they are not
    /// part of the command grammar.
    #[must_use]
    pub const fn is_command_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::KindMissing
                | ErrorKind::KindUnknown(_)
                | ErrorKind::IdentifierMissing
                | ErrorKind::InstanceNotFound(_)
                | ErrorKind::FieldNameMissing
                | ErrorKind::FieldValueMissing
                | ErrorKind::UnrecognizedCommand(_)
                | ErrorKind::Parse { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No kind token supplied where one is required.
    #[error("** class name missing **")]
    KindMissing,

    /// Kind token is not in the closed catalog.
    #[error("** class doesn't exist **")]
    KindUnknown(String),

    /// The verb requires an identifier and none was given.
    #[error("** instance id missing **")]
    IdentifierMissing,

    /// The composite key is not present in the registry.
    #[error("** no instance found **")]
    InstanceNotFound(String),

    /// Update requires a field name and none was given.
    #[error("** attribute name missing **")]
    FieldNameMissing,

    /// Update requires a value and none was given.
    #[error("** value missing **")]
    FieldValueMissing,

    /// Input matches neither the canonical nor the dotted grammar.
    #[error("*** Unknown syntax: {0}")]
    UnrecognizedCommand(String),

    /// A quoted segment or structured literal could not be parsed.
    #[error("** invalid literal: {message} **")]
    Parse {
        /// Description of the problem.
        message: String,
        /// Byte offset into the literal text.
        offset: usize,
    },

    /// The backing file could not be understood.
    #[error("storage file is corrupt: {0}")]
    CorruptStore(String),

    /// Serialization of the registry failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error while touching the backing file.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or command line.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}

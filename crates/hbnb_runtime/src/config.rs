//! Session configuration.
//!
//! Settings are resolved from defaults, then the environment, then
//! command-line flags, each layer overriding the one before.

use std::path::PathBuf;

use hbnb_storage::DEFAULT_FILE;
use thiserror::Error;

use crate::logging::DEFAULT_FILTER;

/// Environment variable naming the backing file.
pub const FILE_VAR: &str = "HBNB_FILE";

/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "HBNB_LOG";

/// A command-line problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An option that takes a value was last on the line.
    #[error("{0} requires a value")]
    MissingValue(String),

    /// An option nobody understands.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Resolved session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Backing file for the registry.
    pub file: PathBuf,
    /// `tracing` filter directives.
    pub log_filter: String,
    /// Script files to run before the interactive loop.
    pub scripts: Vec<PathBuf>,
    /// Exit after running scripts instead of starting the loop.
    pub batch: bool,
    /// Print the welcome banner.
    pub banner: bool,
    /// Print usage and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE),
            log_filter: DEFAULT_FILTER.to_string(),
            scripts: Vec::new(),
            batch: false,
            banner: true,
            show_help: false,
            show_version: false,
        }
    }
}

impl Config {
    /// Resolves the configuration of this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::default()
            .with_env(|name| std::env::var(name).ok())
            .with_args(std::env::args().skip(1))
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(file) = lookup(FILE_VAR) {
            self.file = PathBuf::from(file);
        }
        if let Some(filter) = lookup(LOG_VAR) {
            self.log_filter = filter;
        }
        self
    }

    /// Applies command-line arguments, not including the program name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown option or an option missing its value.
    pub fn with_args<I>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => self.show_help = true,
                "-V" | "--version" => self.show_version = true,
                "-b" | "--batch" => self.batch = true,
                "-v" | "--verbose" => self.log_filter = "debug".to_string(),
                "--no-banner" => self.banner = false,
                "-f" | "--file" => {
                    let path = args.next().ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.file = PathBuf::from(path);
                }
                option if option.starts_with('-') && option != "-" => {
                    return Err(ConfigError::UnknownOption(option.to_string()));
                }
                path => self.scripts.push(PathBuf::from(path)),
            }
        }
        Ok(self)
    }
}

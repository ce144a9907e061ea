//! Diagnostic logging setup.
//!
//! Logs go to stderr so command output on stdout stays exactly what the
//! console prints.

use std::io;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Filter used when none is configured or the configured one is invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter for `directives`, falling back to [`DEFAULT_FILTER`].
///
/// Returns the filter and whether `directives` was accepted.
#[must_use]
pub fn build_filter(directives: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_FILTER), false),
    }
}

/// Installs the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(directives: &str) {
    let (filter, accepted) = build_filter(directives);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();

    if installed && !accepted {
        warn!(directives, "invalid log filter, using {DEFAULT_FILTER}");
    }
}

//! Dotted method-call syntax.
//!
//! Rewrites `Kind.verb(payload)` into the canonical `verb Kind payload` so
//! each verb has exactly one implementation.

use std::borrow::Cow;

use hbnb_foundation::{Error, Result};

use crate::command::Verb;

/// Rewrites a dotted call into canonical form.
///
/// A line without `.` is returned unchanged. Otherwise the text before the
/// first `.` is the kind, the text between the `.` and the first `(` is the
/// verb, and everything between that `(` and the last `)` is the payload.
///
/// # Errors
///
/// - `KindMissing` if nothing precedes the `.`
/// - `UnrecognizedCommand` if the call has no parentheses, has text after
///   the closing `)`, or names a verb that cannot be called this way
pub fn normalize(line: &str) -> Result<Cow<'_, str>> {
    let Some((kind, call)) = line.split_once('.') else {
        return Ok(Cow::Borrowed(line));
    };

    let kind = kind.trim();
    if kind.is_empty() {
        return Err(Error::kind_missing());
    }

    let unrecognized = || Error::unrecognized(line.trim());

    let open = call.find('(').ok_or_else(unrecognized)?;
    let close = call.rfind(')').filter(|&close| close > open).ok_or_else(unrecognized)?;
    if !call[close + 1..].trim().is_empty() {
        return Err(unrecognized());
    }

    let verb = Verb::from_word(call[..open].trim())
        .filter(|verb| verb.is_dispatch())
        .ok_or_else(unrecognized)?;
    let payload = call[open + 1..close].trim();

    let mut canonical = format!("{verb} {kind}");
    if !payload.is_empty() {
        canonical.push(' ');
        canonical.push_str(payload);
    }
    Ok(Cow::Owned(canonical))
}

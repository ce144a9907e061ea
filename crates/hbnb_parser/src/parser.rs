//! Line parsing pipeline.
//!
//! ```text
//! raw line ─► command word? ─yes─► ArgumentLexer ─► Command
//!                 │
//!                 no
//!                 ▼
//!             normalize (Kind.verb(...)) ─► canonical line ─► ArgumentLexer ─► Command
//! ```

use hbnb_foundation::{Error, Result};
use tracing::debug;

use crate::command::{Command, Verb};
use crate::syntax::normalize;
use crate::tokenizer::ArgumentLexer;

/// Parses one input line.
///
/// Returns `Ok(None)` for a blank line. A line that starts with a command
/// word is parsed as-is; anything else must be a dotted call, which is
/// rewritten once and then parsed as canonical.
///
/// # Errors
///
/// Returns `UnrecognizedCommand` for lines matching neither syntax,
/// `KindMissing` for a dotted call with nothing before the `.`, and `Parse`
/// for unterminated quotes.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(command) = parse_canonical(line)? {
        return Ok(Some(command));
    }

    let canonical = normalize(line)?;
    if canonical == line {
        return Err(Error::unrecognized(line));
    }
    debug!(from = line, to = %canonical, "normalized dotted call");

    parse_canonical(&canonical)?
        .map(Some)
        .ok_or_else(|| Error::unrecognized(line))
}

/// Parses `verb args...`, returning `None` if the first word is not a verb.
fn parse_canonical(line: &str) -> Result<Option<Command>> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let Some(verb) = Verb::from_word(word) else {
        return Ok(None);
    };
    let args = ArgumentLexer::tokenize(rest)?;
    Ok(Some(Command::new(verb, args)))
}

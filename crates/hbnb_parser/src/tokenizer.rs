//! Argument tokenization.
//!
//! Splits the argument part of a command line into words and at most one
//! trailing structured literal. Words follow shell quoting rules so a quoted
//! value containing spaces stays one token.

use hbnb_foundation::{Error, Result};

/// A token from a command's argument string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgToken {
    /// A plain word, with quotes removed and trailing commas stripped
    Word(String),
    /// A bracket-delimited list literal, verbatim
    List(String),
    /// A brace-delimited map literal, verbatim
    Map(String),
}

impl ArgToken {
    /// Returns the token text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Word(s) | Self::List(s) | Self::Map(s) => s,
        }
    }

    /// Returns true for list and map literals.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }
}

/// Tokenizes command arguments.
pub struct ArgumentLexer;

impl ArgumentLexer {
    /// Tokenizes an argument string.
    ///
    /// - A `{...}` span (first `{` to last `}`) becomes a trailing [`ArgToken::Map`]
    /// - Otherwise a `[...]` span becomes a trailing [`ArgToken::List`]
    /// - Text before the literal (or the whole string) is split shell-style
    ///
    /// Anything after the literal's closing delimiter is ignored.
    ///
    /// # Errors
    ///
    /// Returns a `Parse` error for an unterminated quote or a dangling
    /// backslash.
    pub fn tokenize(input: &str) -> Result<Vec<ArgToken>> {
        if let Some((open, close)) = literal_span(input, '{', '}') {
            let mut tokens = Self::words(&input[..open])?;
            tokens.push(ArgToken::Map(input[open..=close].to_string()));
            return Ok(tokens);
        }
        if let Some((open, close)) = literal_span(input, '[', ']') {
            let mut tokens = Self::words(&input[..open])?;
            tokens.push(ArgToken::List(input[open..=close].to_string()));
            return Ok(tokens);
        }
        Self::words(input)
    }

    /// Splits shell-style and strips trailing commas from every word.
    fn words(input: &str) -> Result<Vec<ArgToken>> {
        Ok(split_shell(input)?
            .into_iter()
            .filter_map(|word| {
                let stripped = word.trim_end_matches(',');
                // A bare `,` separator is not an argument.
                if stripped.is_empty() && !word.is_empty() {
                    None
                } else {
                    Some(ArgToken::Word(stripped.to_string()))
                }
            })
            .collect())
    }
}

/// Finds the byte range from the first `open` to the last `close`.
fn literal_span(input: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = input.find(open)?;
    let end = input.rfind(close)?;
    (end > start).then_some((start, end))
}

/// Splits `input` on whitespace using POSIX shell quoting.
///
/// Single quotes are literal. Double quotes allow `\"` and `\\`. Outside
/// quotes a backslash escapes any character. Adjacent segments join.
///
/// # Errors
///
/// Returns a `Parse` error for an unterminated quote or a trailing escape.
pub fn split_shell(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            '\'' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, c)) => word.push(c),
                        None => return Err(Error::parse("no closing quotation", offset)),
                    }
                }
            }
            '"' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.peek() {
                            Some(&(_, c @ ('"' | '\\'))) => {
                                chars.next();
                                word.push(c);
                            }
                            _ => word.push('\\'),
                        },
                        Some((_, c)) => word.push(c),
                        None => return Err(Error::parse("no closing quotation", offset)),
                    }
                }
            }
            '\\' => match chars.next() {
                Some((_, c)) => current.get_or_insert_with(String::new).push(c),
                None => return Err(Error::parse("no escaped character", offset)),
            },
            c => current.get_or_insert_with(String::new).push(c),
        }
    }

    if let Some(word) = current {
        words.push(word);
    }
    Ok(words)
}

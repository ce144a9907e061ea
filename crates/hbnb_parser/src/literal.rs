//! Parser for structured literals.
//!
//! Turns the text of a dict or list literal (as typed after `update`) into a
//! [`Value`]. Only data is accepted: strings, numbers, booleans, `None`,
//! lists, and maps with string keys. Nothing is evaluated.

use hbnb_foundation::{Error, Fields, Result, Value};
use im::Vector;

use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting of lists and maps a literal may have.
///
/// Stays well under the read limit of the JSON backing file so anything
/// accepted here can be loaded again.
pub const MAX_DEPTH: usize = 64;

/// Parses `text` as exactly one literal.
///
/// # Errors
///
/// Returns a `Parse` error if the text is not a single well-formed literal.
pub fn parse_literal(text: &str) -> Result<Value> {
    let mut parser = LiteralParser::new(text);
    let value = parser.parse_value()?;
    match &parser.current.kind {
        TokenKind::Eof => Ok(value),
        other => Err(parser.error(&format!("unexpected {} after literal", other.name()))),
    }
}

/// Parses `text` as a map literal, returning its entries.
///
/// # Errors
///
/// Returns a `Parse` error if the text is malformed or is not a map.
pub fn parse_map_literal(text: &str) -> Result<Fields> {
    match parse_literal(text)? {
        Value::Map(map) => Ok(map),
        other => Err(Error::parse(
            format!("expected a map, found {}", other.type_name()),
            0,
        )),
    }
}

/// Recursive-descent parser over the literal token stream.
struct LiteralParser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    depth: usize,
}

impl<'src> LiteralParser<'src> {
    fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn error(&self, message: &str) -> Error {
        Error::parse(message, self.current.offset)
    }

    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        if &self.current.kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                expected.name(),
                self.current.kind.name()
            )))
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        let value = match &self.current.kind {
            TokenKind::Int(n) => Value::Int(*n),
            TokenKind::Float(n) => Value::Float(*n),
            TokenKind::String(s) => Value::String(s.clone()),
            TokenKind::Word(word) => match word.as_str() {
                "True" | "true" => Value::Bool(true),
                "False" | "false" => Value::Bool(false),
                "None" | "null" => Value::Nil,
                _ => return Err(self.error(&format!("unknown name '{word}'"))),
            },
            TokenKind::LBracket => return self.nested(Self::parse_list),
            TokenKind::LBrace => return self.nested(Self::parse_map),
            TokenKind::Eof => return Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => return Err(self.error(msg)),
            other => return Err(self.error(&format!("unexpected {}", other.name()))),
        };
        self.advance();
        Ok(value)
    }

    /// Runs `parse` one nesting level deeper.
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("literal nested too deeply"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Parses a list: `[a, b, ...]`.
    fn parse_list(&mut self) -> Result<Value> {
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vector::new();

        while self.current.kind != TokenKind::RBracket {
            items.push_back(self.parse_value()?);
            if !self.separator(&TokenKind::RBracket)? {
                break;
            }
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(Value::List(items))
    }

    /// Parses a map: `{'k': v, ...}`.
    fn parse_map(&mut self) -> Result<Value> {
        self.expect(&TokenKind::LBrace)?;
        let mut entries = Fields::new();

        while self.current.kind != TokenKind::RBrace {
            let key = match &self.current.kind {
                TokenKind::String(s) => s.clone(),
                TokenKind::Error(msg) => return Err(self.error(msg)),
                other => {
                    return Err(self.error(&format!("map keys must be strings, found {}", other.name())));
                }
            };
            self.advance();
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value()?;
            entries.insert(key, value);
            if !self.separator(&TokenKind::RBrace)? {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Value::Map(entries))
    }

    /// Consumes a comma between items. Returns false when the collection
    /// ends without one.
    fn separator(&mut self, close: &TokenKind) -> Result<bool> {
        if self.current.kind == TokenKind::Comma {
            self.advance();
            Ok(true)
        } else if &self.current.kind == close {
            Ok(false)
        } else {
            Err(self.error(&format!(
                "expected ',' or {}, found {}",
                close.name(),
                self.current.kind.name()
            )))
        }
    }
}

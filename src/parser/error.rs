use std::error::Error;
use std::fmt::{self, Display};

use crate::lexer::{Position, TokenKind};

/// A single parser diagnostic. Kept separate from `String` so callers (the
/// REPL, `--emit-ast`) can inspect `position` instead of scraping text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: TokenKind, position: Position) -> Self {
        Self {
            message: format!("expected next token to be {expected} but got {got} instead"),
            position,
        }
    }

    pub fn no_prefix_parse_fn(kind: TokenKind, position: Position) -> Self {
        Self {
            message: format!("no prefix parse function for {kind:?} found"),
            position,
        }
    }

    pub fn bad_integer(literal: &str, position: Position) -> Self {
        Self {
            message: format!("could not parse {literal:?} as integer"),
            position,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ParseError {}

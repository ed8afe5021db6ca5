use std::error::Error;
use std::fmt::{self, Display};

use super::Position;

/// A single lexer diagnostic, mirroring `parser::ParseError`'s shape: a
/// message plus the position it was raised at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

impl LexError {
    pub fn illegal_character(literal: &str, position: Position) -> Self {
        Self {
            message: format!("illegal character {literal:?}"),
            position,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for LexError {}

use std::fmt::{self, Display};

use crate::ast::{Expression, Node};
use crate::lexer::{Position, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLiteral {
    pub token: Token,
    /// Source order; duplicate keys are permitted here and resolved
    /// (last-write-wins) at evaluation time, not at parse time.
    pub pairs: Vec<(Expression, Expression)>,
}

impl Node for HashLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }

    fn position(&self) -> Position {
        self.token.position
    }
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{pairs}}}")
    }
}

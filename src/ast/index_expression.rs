use std::fmt::{self, Display};

use crate::ast::{Expression, Node};
use crate::lexer::{Position, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Node for IndexExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }

    fn position(&self) -> Position {
        self.token.position
    }
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

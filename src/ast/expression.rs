use std::fmt::{self, Display};

use crate::ast::{
    ArrayLiteral, BooleanLiteral, CallExpression, FunctionLiteral, HashLiteral, Identifier,
    IfExpression, IndexExpression, InfixExpression, IntegerLiteral, Node, PrefixExpression,
    StringLiteral,
};
use crate::lexer::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    StringLiteral(StringLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Hash(HashLiteral),
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Identifier(e) => e.position(),
            Expression::Integer(e) => e.position(),
            Expression::Boolean(e) => e.position(),
            Expression::StringLiteral(e) => e.position(),
            Expression::Prefix(e) => e.position(),
            Expression::Infix(e) => e.position(),
            Expression::If(e) => e.position(),
            Expression::Function(e) => e.position(),
            Expression::Call(e) => e.position(),
            Expression::Array(e) => e.position(),
            Expression::Index(e) => e.position(),
            Expression::Hash(e) => e.position(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(e) => write!(f, "{e}"),
            Expression::Integer(e) => write!(f, "{e}"),
            Expression::Boolean(e) => write!(f, "{e}"),
            Expression::StringLiteral(e) => write!(f, "{e}"),
            Expression::Prefix(e) => write!(f, "{e}"),
            Expression::Infix(e) => write!(f, "{e}"),
            Expression::If(e) => write!(f, "{e}"),
            Expression::Function(e) => write!(f, "{e}"),
            Expression::Call(e) => write!(f, "{e}"),
            Expression::Array(e) => write!(f, "{e}"),
            Expression::Index(e) => write!(f, "{e}"),
            Expression::Hash(e) => write!(f, "{e}"),
        }
    }
}

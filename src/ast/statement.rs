use std::fmt::{self, Display};

use crate::ast::{BlockStatement, ExpressionStatement, LetStatement, Node, ReturnStatement};
use crate::lexer::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::Let(s) => s.position(),
            Statement::Return(s) => s.position(),
            Statement::Expression(s) => s.position(),
            Statement::Block(s) => s.position(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "{s}"),
            Statement::Return(s) => write!(f, "{s}"),
            Statement::Expression(s) => write!(f, "{s}"),
            Statement::Block(s) => write!(f, "{s}"),
        }
    }
}

mod error;

pub use error::ParseError;

use crate::ast::{
    ArrayLiteral, BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement,
    FunctionLiteral, HashLiteral, Identifier, IfExpression, IndexExpression, InfixExpression,
    IntegerLiteral, LetStatement, Program, ReturnStatement, Statement, StringLiteral,
};
use crate::lexer::{LexError, Lexer, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Slash | TokenKind::Asterisk => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Pratt parser: a prefix handler and, where applicable, an infix handler are
/// dispatched per `current_token`/`peek_token` kind instead of a table of
/// function pointers, per the "function pointers to variant case" idiom used
/// throughout this crate.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: vec![],
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Illegal-character diagnostics the underlying lexer collected while
    /// this parser was pulling tokens from it.
    pub fn lex_errors(&self) -> &[LexError] {
        self.lexer.errors()
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            true
        } else {
            self.errors.push(ParseError::unexpected_token(
                kind,
                self.peek.kind,
                self.peek.position,
            ));
            false
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.current.clone());

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(ExpressionStatement { token, expression })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < precedence_of(self.peek.kind)
        {
            left = match self.peek.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Slash
                | TokenKind::Asterisk
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.advance();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.advance();
                    self.parse_call_expression(left)?
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.parse_index_expression(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier::new(self.current.clone()))),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Some(Expression::StringLiteral(StringLiteral {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
                token: self.current.clone(),
                value: self.current.kind == TokenKind::True,
            })),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => {
                self.errors.push(ParseError::no_prefix_parse_fn(kind, self.current.position));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                self.errors.push(ParseError::bad_integer(&token.literal, token.position));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.literal.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(crate::ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.literal.clone();
        let precedence = precedence_of(self.current.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek.kind == TokenKind::Else {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = vec![];
        self.advance();

        while self.current.kind != TokenKind::RBrace && self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        BlockStatement { token, statements }
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function(FunctionLiteral { token, params, body }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut params = vec![];

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(params);
        }

        self.advance();
        params.push(Identifier::new(self.current.clone()));

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            params.push(Identifier::new(self.current.clone()));
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// Shared by call arguments and array elements: a comma-separated
    /// expression list terminated by `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek.kind == end {
            self.advance();
            return Some(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expression::Index(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let mut pairs = vec![];

        while self.peek.kind != TokenKind::RBrace {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if self.peek.kind != TokenKind::RBrace && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::Hash(HashLiteral { token, pairs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(src: &str) -> (Program, Vec<ParseError>) {
        let mut parser = Parser::new(Lexer::new(src));
        let program = parser.parse_program();
        (program, parser.errors().to_vec())
    }

    fn assert_no_errors(errors: &[ParseError]) {
        assert!(errors.is_empty(), "unexpected parser errors: {errors:?}");
    }

    #[test]
    fn operator_precedence_round_trips_through_display() {
        let cases = [
            ("a + b * c", "(a + (b * c))"),
            ("-a * b", "((- a) * b)"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("!-a", "(! (- a))"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(- (5 + 5))"),
            ("!(true == true)", "(! (true == true))"),
        ];

        for (input, expected) in cases {
            let (program, errors) = parse(input);
            assert_no_errors(&errors);
            assert_eq!(program.to_string(), expected, "input was {input:?}");
        }
    }

    #[test]
    fn parses_let_statement_value() {
        let (program, errors) = parse("let x = 5 + 5;");
        assert_no_errors(&errors);
        assert_eq!(program.statements.len(), 1);
        let Statement::Let(LetStatement { name, value, .. }) = &program.statements[0] else {
            panic!("expected let statement");
        };
        assert_eq!(name.value, "x");
        assert_eq!(value.to_string(), "(5 + 5)");
    }

    #[test]
    fn parses_return_statement_value() {
        let (program, errors) = parse("return 5 + 5;");
        assert_no_errors(&errors);
        let Statement::Return(ReturnStatement { value, .. }) = &program.statements[0] else {
            panic!("expected return statement");
        };
        assert_eq!(value.to_string(), "(5 + 5)");
    }

    #[test]
    fn parses_function_literal_with_params() {
        let (program, errors) = parse("fn(x, y) { x + y; }");
        assert_no_errors(&errors);
        assert_eq!(program.to_string(), "fn(x, y) { (x + y) }");
    }

    #[test]
    fn parses_call_expression_arguments() {
        let (program, errors) = parse("add(1, 2 * 3, 4 + 5);");
        assert_no_errors(&errors);
        assert_eq!(program.to_string(), "add(1, (2 * 3), (4 + 5))");
    }

    #[test]
    fn records_error_on_missing_token() {
        let (_program, errors) = parse("let x 5;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be ASSIGN but got INT instead"
        );
    }

    #[test]
    fn records_error_for_missing_prefix_parser() {
        let (_program, errors) = parse(";");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("no prefix parse function"));
    }

    #[test]
    fn parser_with_errors_still_returns_partial_program() {
        let (program, errors) = parse("let x = 5; let y 10; let z = 15;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn parses_index_and_hash_literals() {
        let (program, errors) = parse(r#"myArray[1 + 1]"#);
        assert_no_errors(&errors);
        assert_eq!(program.to_string(), "(myArray[(1 + 1)])");

        let (program, errors) = parse(r#"{"one": 1, "two": 2}"#);
        assert_no_errors(&errors);
        assert_eq!(program.to_string(), "{\"one\": 1, \"two\": 2}");
    }

    #[test]
    fn surfaces_illegal_characters_from_the_underlying_lexer() {
        let mut parser = Parser::new(Lexer::new("let x = 1 @ 2;"));
        parser.parse_program();
        assert_eq!(parser.lex_errors().len(), 1);
        assert_eq!(parser.lex_errors()[0].to_string(), "illegal character \"@\"");
    }

    #[test]
    fn parse_error_and_lex_error_are_std_error() {
        fn assert_is_error<E: std::error::Error>(_: &E) {}
        let (_program, errors) = parse(";");
        assert_is_error(&errors[0]);
    }
}

mod error;
mod token;

pub use error::LexError;
pub use token::{Position, Token, TokenKind};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("fn", TokenKind::Function);
    m.insert("let", TokenKind::Let);
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("return", TokenKind::Return);
    m
});

/// A single-character-lookahead scanner over source text.
///
/// `next_token` is the only entry point needed by the parser; it is pure and
/// restartable (no I/O), and keeps returning `Eof` once the input is
/// exhausted.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
            errors: vec![],
        }
    }

    /// Illegal-character diagnostics collected so far. Scanning itself never
    /// stops on one of these; the `Illegal` token still reaches the parser,
    /// which is free to surface the underlying `LexError`s too.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.iterator.next();
        match next {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        next
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Collect every remaining token, including the terminating `Eof`.
    pub fn tokens(&mut self) -> Vec<Token> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = (self.line, self.col);

        let Some(c) = self.peek() else {
            let token = Token::eof(position);
            trace!("lexed {:?} at {:?}", token.kind, token.position);
            return token;
        };

        let token = match c {
            '=' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    Token::new(TokenKind::Eq, "==", position)
                } else {
                    Token::new(TokenKind::Assign, "=", position)
                }
            }
            '!' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    Token::new(TokenKind::NotEq, "!=", position)
                } else {
                    Token::new(TokenKind::Bang, "!", position)
                }
            }
            '+' => self.single(TokenKind::Plus, position),
            '-' => self.single(TokenKind::Minus, position),
            '*' => self.single(TokenKind::Asterisk, position),
            '/' => self.single(TokenKind::Slash, position),
            '<' => self.single(TokenKind::Lt, position),
            '>' => self.single(TokenKind::Gt, position),
            ',' => self.single(TokenKind::Comma, position),
            ';' => self.single(TokenKind::Semicolon, position),
            ':' => self.single(TokenKind::Colon, position),
            '(' => self.single(TokenKind::LParen, position),
            ')' => self.single(TokenKind::RParen, position),
            '{' => self.single(TokenKind::LBrace, position),
            '}' => self.single(TokenKind::RBrace, position),
            '[' => self.single(TokenKind::LBracket, position),
            ']' => self.single(TokenKind::RBracket, position),
            '"' => self.lex_string(position),
            c if c.is_ascii_digit() => self.lex_number(position),
            c if is_ident_start(c) => self.lex_ident(position),
            _ => {
                self.bump();
                self.errors.push(LexError::illegal_character(c.to_string().as_str(), position));
                Token::new(TokenKind::Illegal, "", position)
            }
        };

        trace!("lexed {:?} {:?} at {:?}", token.kind, token.literal, token.position);
        token
    }

    fn single(&mut self, kind: TokenKind, position: Position) -> Token {
        let c = self.bump().expect("caller already peeked a character");
        Token::new(kind, c.to_string(), position)
    }

    /// Reads until the closing `"` or end of input. No escape processing: the
    /// literal is exactly the bytes between the quotes.
    fn lex_string(&mut self, position: Position) -> Token {
        self.bump(); // opening quote
        let mut literal = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    break;
                }
                Some(c) => {
                    literal.push(c);
                    self.bump();
                }
                None => break,
            }
        }
        Token::new(TokenKind::String, literal, position)
    }

    fn lex_number(&mut self, position: Position) -> Token {
        let mut literal = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            literal.push(self.bump().unwrap());
        }
        Token::new(TokenKind::Int, literal, position)
    }

    fn lex_ident(&mut self, position: Position) -> Token {
        let mut literal = String::new();
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            literal.push(self.bump().unwrap());
        }
        let kind = KEYWORDS.get(literal.as_str()).copied().unwrap_or(TokenKind::Ident);
        Token::new(kind, literal, position)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

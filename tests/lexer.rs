use monkey::lexer::{Lexer, TokenKind};

#[test]
fn tokenizes_a_small_program_source() {
    let input = r#"
        let five = 5;
        let add = fn(x, y) {
          x + y;
        };
        let result = add(five, 10);
        !-/*5;
        5 < 10 > 5;

        if (5 < 10) {
            return true;
        } else {
            return false;
        }

        10 == 10;
        10 != 9;
        "foobar";
        "foo bar";
        [1, 2];
        {"foo": "bar"};
    "#;

    let kinds: Vec<TokenKind> = Lexer::new(input).tokens().into_iter().map(|t| t.kind).collect();

    assert_eq!(kinds.first(), Some(&TokenKind::Let));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert!(kinds.contains(&TokenKind::Function));
    assert!(kinds.contains(&TokenKind::String));
    assert!(kinds.contains(&TokenKind::LBracket));
    assert!(kinds.contains(&TokenKind::LBrace));
    assert!(kinds.contains(&TokenKind::NotEq));
}

#[test]
fn tracks_line_and_column_positions_across_newlines() {
    let tokens = Lexer::new("let x = 1;\nlet y = 2;").tokens();
    let second_let = tokens.iter().filter(|t| t.kind == TokenKind::Let).nth(1).unwrap();
    assert_eq!(second_let.position.0, 2);
}

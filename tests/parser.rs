use monkey::lexer::Lexer;
use monkey::parser::Parser;

fn parse(input: &str) -> (monkey::ast::Program, Vec<monkey::ParseError>) {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}

#[test]
fn parses_let_and_return_statements() {
    let (program, errors) = parse("let x = 5; let y = 10; return x + y;");
    assert!(errors.is_empty());
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn if_else_round_trips_through_display() {
    let (program, errors) = parse("if (x < y) { x } else { y }");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "if(x < y) { x } else { y }");
}

#[test]
fn function_literal_with_no_params() {
    let (program, errors) = parse("fn() { return 5; }");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "fn() { return 5; }");
}

#[test]
fn nested_array_and_call_expressions_round_trip() {
    let (program, errors) = parse("a * [1, 2, 3, 4][b * c] * d");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "((a * ([1, 2, 3, 4][(b * c)])) * d)");
}

#[test]
fn accumulates_multiple_parser_errors_without_panicking() {
    let (_program, errors) = parse("let x 5; let y 10;");
    assert_eq!(errors.len(), 2);
}

//! Recursive tree-walking evaluator.
//!
//! `eval_program` unwraps a top-level `ReturnValue`; `eval_block_statement`
//! deliberately does not, so a `return` inside nested blocks keeps propagating
//! outward until it reaches either the enclosing function call or the top of
//! the program.
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::ast::{
    BlockStatement, CallExpression, Expression, HashLiteral, IfExpression, IndexExpression,
    Program, Statement,
};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{FunctionObject, HashObject, Object};

/// Guards against runaway recursion from self-referential function calls
/// instead of letting the host stack overflow.
const MAX_CALL_DEPTH: usize = 1000;

type Env = Rc<RefCell<Environment>>;

pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env, 0);
        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_block_statement(block: &BlockStatement, env: &Env, depth: usize) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env, depth);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Env, depth: usize) -> Object {
    debug!("evaluating statement at depth {depth}: {statement}");
    match statement {
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env, depth);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(stmt.name.value.clone(), value);
            Object::Null
        }
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.value, env, depth);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression(stmt) => eval_expression(&stmt.expression, env, depth),
        Statement::Block(block) => eval_block_statement(block, env, depth),
    }
}

fn eval_expression(expression: &Expression, env: &Env, depth: usize) -> Object {
    match expression {
        Expression::Integer(lit) => Object::Integer(lit.value),
        Expression::Boolean(lit) => Object::Boolean(lit.value),
        Expression::StringLiteral(lit) => Object::String(lit.value.clone()),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(expr) => {
            let right = eval_expression(&expr.right, env, depth);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&expr.operator, right)
        }
        Expression::Infix(expr) => {
            let left = eval_expression(&expr.left, env, depth);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&expr.right, env, depth);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&expr.operator, left, right)
        }
        Expression::If(expr) => eval_if_expression(expr, env, depth),
        Expression::Function(expr) => Object::Function(FunctionObject {
            params: expr.params.clone(),
            body: expr.body.clone(),
            env: env.clone(),
        }),
        Expression::Call(expr) => eval_call_expression(expr, env, depth),
        Expression::Array(expr) => match eval_expressions(&expr.elements, env, depth) {
            Ok(elements) => Object::Array(elements),
            Err(err) => err,
        },
        Expression::Index(expr) => eval_index_expression(expr, env, depth),
        Expression::Hash(expr) => eval_hash_literal(expr, env, depth),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Object::Error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(i) => Object::Integer(-i),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
        other => Object::Error(format!("unknown operator: {other}{}", right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, l, r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, &l, &r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            "==" => Object::Boolean(l == r),
            "!=" => Object::Boolean(l != r),
            other => Object::Error(format!("unknown operator: BOOLEAN {other} BOOLEAN")),
        },
        (l, r) if l.type_name() != r.type_name() => Object::Error(format!(
            "type mismatch: {} {operator} {}",
            l.type_name(),
            r.type_name()
        )),
        // Same tag, neither Integer/String/Boolean (Array, Hash, Function, Null, Builtin):
        // `==`/`!=` compare by reference identity. Every literal evaluation produces a
        // distinct value here, so two such values are never equal, except `Null`, which
        // has exactly one inhabitant and so always compares equal to itself.
        (Object::Null, Object::Null) if operator == "==" => Object::Boolean(true),
        (Object::Null, Object::Null) if operator == "!=" => Object::Boolean(false),
        (_, _) if operator == "==" => Object::Boolean(false),
        (_, _) if operator == "!=" => Object::Boolean(true),
        (l, r) => Object::Error(format!(
            "unknown operator: {} {operator} {}",
            l.type_name(),
            r.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left / right)
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        other => Object::Error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(format!("{left}{right}")),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        other => Object::Error(format!("unknown operator: STRING {other} STRING")),
    }
}

fn eval_if_expression(
    expr: &IfExpression,
    env: &Env,
    depth: usize,
) -> Object {
    let condition = eval_expression(&expr.condition, env, depth);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(&expr.consequence, env, depth)
    } else if let Some(alternative) = &expr.alternative {
        eval_block_statement(alternative, env, depth)
    } else {
        Object::Null
    }
}

fn eval_expressions(exprs: &[Expression], env: &Env, depth: usize) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env, depth);
        if value.is_error() {
            return Err(value);
        }
        result.push(value);
    }
    Ok(result)
}

fn eval_call_expression(
    expr: &CallExpression,
    env: &Env,
    depth: usize,
) -> Object {
    let function = eval_expression(&expr.function, env, depth);
    if function.is_error() {
        return function;
    }

    let args = match eval_expressions(&expr.arguments, env, depth) {
        Ok(args) => args,
        Err(err) => return err,
    };

    apply_function(function, args, depth)
}

fn apply_function(function: Object, args: Vec<Object>, depth: usize) -> Object {
    if depth >= MAX_CALL_DEPTH {
        warn!("call depth exceeded {MAX_CALL_DEPTH}, aborting call");
        return Object::Error("maximum recursion depth exceeded".to_string());
    }

    match function {
        Object::Function(function) => {
            let call_env = Environment::enclosed(function.env.clone());
            for (i, param) in function.params.iter().enumerate() {
                let value = args.get(i).cloned().unwrap_or(Object::Null);
                call_env.borrow_mut().set(param.value.clone(), value);
            }
            let result = eval_block_statement(&function.body, &call_env, depth + 1);
            match result {
                Object::ReturnValue(value) => *value,
                other => other,
            }
        }
        Object::Builtin(_, f) => f(&args),
        other => Object::Error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_index_expression(
    expr: &IndexExpression,
    env: &Env,
    depth: usize,
) -> Object {
    let left = eval_expression(&expr.left, env, depth);
    if left.is_error() {
        return left;
    }
    let index = eval_expression(&expr.index, env, depth);
    if index.is_error() {
        return index;
    }

    match (&left, &index) {
        (Object::Array(items), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= items.len() {
                Object::Null
            } else {
                items[*i as usize].clone()
            }
        }
        (Object::Hash(hash), _) => match index.hash_key() {
            Ok(key) => hash.get(&key).cloned().unwrap_or(Object::Null),
            Err(message) => Object::Error(message),
        },
        _ => Object::Error(format!("index operator not supported: {}", left.type_name())),
    }
}

fn eval_hash_literal(expr: &HashLiteral, env: &Env, depth: usize) -> Object {
    let mut hash = HashObject::new();

    for (key_expr, value_expr) in &expr.pairs {
        let key_obj = eval_expression(key_expr, env, depth);
        if key_obj.is_error() {
            return key_obj;
        }
        let key = match key_obj.hash_key() {
            Ok(key) => key,
            Err(message) => return Object::Error(message),
        };

        let value = eval_expression(value_expr, env, depth);
        if value.is_error() {
            return value;
        }

        hash.insert(key, key_obj, value);
    }

    Object::Hash(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(input: &str) -> Object {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parser errors: {:?}", parser.errors());
        eval_program(&program, &Environment::new())
    }

    #[test]
    fn evaluates_integer_arithmetic() {
        assert!(matches!(run("5 + 5 * 2"), Object::Integer(15)));
        assert!(matches!(run("(5 + 10 * 2 + 15 / 3) * 2 + -10"), Object::Integer(50)));
    }

    #[test]
    fn evaluates_boolean_and_comparison_expressions() {
        assert!(matches!(run("1 < 2 == true"), Object::Boolean(true)));
        assert!(matches!(run("!true"), Object::Boolean(false)));
        assert!(matches!(run("!5"), Object::Boolean(false)));
        assert!(matches!(run("!!5"), Object::Boolean(true)));
    }

    #[test]
    fn if_with_falsy_condition_and_no_alternative_yields_null() {
        assert!(matches!(run("if (false) { 10 }"), Object::Null));
    }

    #[test]
    fn zero_condition_is_truthy() {
        assert!(matches!(run("if (0) { 10 }"), Object::Integer(10)));
    }

    #[test]
    fn return_statement_stops_block_evaluation_early() {
        let input = "if (10 > 1) { if (10 > 1) { return 10; } return 1; }";
        assert!(matches!(run(input), Object::Integer(10)));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let input = "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(3);";
        assert!(matches!(run(input), Object::Integer(5)));
    }

    #[test]
    fn string_concatenation() {
        match run(r#""Hello" + " " + "World!""#) {
            Object::String(s) => assert_eq!(s, "Hello World!"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn error_messages_match_closed_taxonomy() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true;", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
            ("foobar;", "identifier not found: foobar"),
            (r#"{"name": "Monkey"}[fn(x) { x }];"#, "unusable as hash key: FUNCTION"),
            ("5[0];", "index operator not supported: INTEGER"),
        ];

        for (input, expected) in cases {
            match run(input) {
                Object::Error(message) => assert_eq!(message, expected, "input was {input:?}"),
                other => panic!("expected error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn division_by_zero_yields_error() {
        assert!(matches!(run("1 / 0;"), Object::Error(ref m) if m == "division by zero"));
    }

    #[test]
    fn array_index_out_of_range_yields_null() {
        assert!(matches!(run("[1, 2, 3][10]"), Object::Null));
        assert!(matches!(run("[1, 2, 3][-1]"), Object::Null));
    }

    #[test]
    fn missing_hash_key_yields_null() {
        assert!(matches!(run(r#"{"a": 1}["b"]"#), Object::Null));
    }

    #[test]
    fn calling_non_function_is_an_error() {
        assert!(matches!(run("5();"), Object::Error(ref m) if m == "not a function: INTEGER"));
    }

    #[test]
    fn missing_call_arguments_bind_to_null() {
        assert!(matches!(run("let f = fn(x, y) { y }; f(1);"), Object::Null));
    }

    #[test]
    fn extra_call_arguments_are_ignored() {
        assert!(matches!(run("let f = fn(x) { x }; f(1, 2, 3);"), Object::Integer(1)));
    }

    #[test]
    fn deeply_recursive_function_is_bounded_instead_of_overflowing_the_stack() {
        let input = "let loop = fn(n) { loop(n + 1) }; loop(0);";
        assert!(matches!(run(input), Object::Error(ref m) if m == "maximum recursion depth exceeded"));
    }
}

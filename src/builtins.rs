//! Fixed registry of builtin functions. No user-defined builtins: this table
//! is the whole surface, looked up by name when the evaluator resolves an
//! identifier that isn't bound in any environment scope.
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::object::{BuiltinFn, Object};

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, BuiltinFn> = HashMap::new();
    m.insert("len", len);
    m.insert("first", first);
    m.insert("last", last);
    m.insert("rest", rest);
    m.insert("push", push);
    m.insert("puts", puts);
    m
});

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).map(|f| Object::Builtin(leak_name(name), *f))
}

/// Builtin names are a fixed, small set of `'static` string literals already;
/// this just recovers that `'static` lifetime from the table's own key.
fn leak_name(name: &str) -> &'static str {
    BUILTINS.keys().find(|k| **k == name).copied().unwrap_or("")
}

fn wrong_arg_count(expected: usize, got: usize) -> Object {
    Object::Error(format!("wrong number of arguments. expected={expected}, got={got}"))
}

fn unsupported_arg(name: &str, obj: &Object) -> Object {
    Object::Error(format!(
        "argument to '{name}' not supported, got {}",
        obj.type_name()
    ))
}

fn len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(1, args.len());
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(items) => Object::Integer(items.len() as i64),
        other => unsupported_arg("len", other),
    }
}

fn first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(1, args.len());
    }
    match &args[0] {
        Object::Array(items) => items.first().cloned().unwrap_or(Object::Null),
        other => unsupported_arg("first", other),
    }
}

fn last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(1, args.len());
    }
    match &args[0] {
        Object::Array(items) => items.last().cloned().unwrap_or(Object::Null),
        other => unsupported_arg("last", other),
    }
}

fn rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arg_count(1, args.len());
    }
    match &args[0] {
        Object::Array(items) => {
            if items.is_empty() {
                Object::Null
            } else {
                Object::Array(items[1..].to_vec())
            }
        }
        other => unsupported_arg("rest", other),
    }
}

fn push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return wrong_arg_count(2, args.len());
    }
    match &args[0] {
        Object::Array(items) => {
            let mut items = items.clone();
            items.push(args[1].clone());
            Object::Array(items)
        }
        other => Object::Error(format!("argument to 'push' must be ARRAY, got {}", other.type_name())),
    }
}

fn puts(args: &[Object]) -> Object {
    for arg in args {
        println!("{arg}");
    }
    Object::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Object]) -> Object {
        match lookup(name).unwrap() {
            Object::Builtin(_, f) => f(args),
            _ => unreachable!(),
        }
    }

    #[test]
    fn len_counts_utf8_bytes_and_elements() {
        assert!(matches!(call("len", &[Object::String("hello".into())]), Object::Integer(5)));
        assert!(matches!(call("len", &[Object::String(String::new())]), Object::Integer(0)));
        assert!(matches!(
            call("len", &[Object::Array(vec![Object::Integer(1), Object::Integer(2)])]),
            Object::Integer(2)
        ));
    }

    #[test]
    fn len_rejects_unsupported_types() {
        let result = call("len", &[Object::Integer(1)]);
        assert!(matches!(result, Object::Error(ref m) if m == "argument to 'len' not supported, got INTEGER"));
    }

    #[test]
    fn len_rejects_wrong_arg_count() {
        let result = call("len", &[]);
        assert!(matches!(result, Object::Error(ref m) if m == "wrong number of arguments. expected=1, got=0"));
    }

    #[test]
    fn first_and_last_on_empty_array_yield_null() {
        assert!(matches!(call("first", &[Object::Array(vec![])]), Object::Null));
        assert!(matches!(call("last", &[Object::Array(vec![])]), Object::Null));
    }

    #[test]
    fn rest_drops_first_element_without_mutating_input() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
        let result = call("rest", &[arr]);
        match result {
            Object::Array(items) => assert_eq!(items.len(), 2),
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn rest_on_empty_array_yields_null() {
        assert!(matches!(call("rest", &[Object::Array(vec![])]), Object::Null));
    }

    #[test]
    fn push_appends_without_mutating_original() {
        let arr = Object::Array(vec![Object::Integer(1)]);
        let result = call("push", &[arr.clone(), Object::Integer(2)]);
        match (arr, result) {
            (Object::Array(original), Object::Array(pushed)) => {
                assert_eq!(original.len(), 1);
                assert_eq!(pushed.len(), 2);
            }
            _ => panic!("expected arrays"),
        }
    }

    #[test]
    fn push_reports_a_typed_argument_error() {
        let result = call("push", &[Object::Integer(1), Object::Integer(2)]);
        assert!(matches!(result, Object::Error(ref m) if m == "argument to 'push' must be ARRAY, got INTEGER"));
    }

    #[test]
    fn unknown_name_is_not_in_registry() {
        assert!(lookup("no_such_builtin").is_none());
    }
}

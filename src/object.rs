//! Runtime value model produced by the evaluator.
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Environment;

pub type BuiltinFn = fn(&[Object]) -> Object;

/// Every value the evaluator can produce. Dispatch is a closed `match` over
/// this enum rather than trait objects, mirroring the rest of the crate.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    Hash(HashObject),
    Function(FunctionObject),
    Builtin(&'static str, BuiltinFn),
    ReturnValue(Box<Object>),
    Error(String),
    Null,
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(..) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Null => "NULL",
        }
    }

    /// Everything except `false` and `Null` is truthy, including `0`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn hash_key(&self) -> Result<HashKey, String> {
        match self {
            Object::Integer(i) => Ok(HashKey::Integer(*i)),
            Object::Boolean(b) => Ok(HashKey::Boolean(*b)),
            Object::String(s) => Ok(HashKey::String(s.clone())),
            other => Err(format!("unusable as hash key: {}", other.type_name())),
        }
    }
}

/// Key used for `Object::Hash` lookups. Only hashable value kinds produce one;
/// everything else is rejected at evaluation time, never at this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(i) => write!(f, "{i}"),
            HashKey::Boolean(b) => write!(f, "{b}"),
            HashKey::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// A hash literal's runtime value. Keeps insertion order alongside the lookup
/// map so iteration/`inspect()` is stable, since `HashMap` alone wouldn't be.
#[derive(Debug, Clone)]
pub struct HashObject {
    pub entries: HashMap<HashKey, (Object, Object)>,
    pub order: Vec<HashKey>,
}

impl HashObject {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: vec![],
        }
    }

    pub fn insert(&mut self, key: HashKey, key_obj: Object, value: Object) {
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, (key_obj, value));
    }

    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.entries.get(key).map(|(_, v)| v)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &(Object, Object)> {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }
}

impl Default for HashObject {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct FunctionObject {
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(i) => write!(f, "{i}"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::String(s) => write!(f, "{s}"),
            Object::Array(items) => {
                let items = items.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "[{items}]")
            }
            Object::Hash(hash) => {
                let pairs = hash
                    .pairs()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{pairs}}}")
            }
            Object::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|p| p.value.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({params}) {{\n{}\n}}", function.body)
            }
            Object::Builtin(name, _) => write!(f, "builtin function {name}"),
            Object::ReturnValue(value) => write!(f, "{value}"),
            Object::Error(message) => write!(f, "ERROR: {message}"),
            Object::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_spec_rules() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::String(String::new()).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
        assert!(Object::Boolean(true).is_truthy());
    }

    #[test]
    fn hash_key_rejects_unhashable_types() {
        let err = Object::Array(vec![]).hash_key().unwrap_err();
        assert_eq!(err, "unusable as hash key: ARRAY");
    }

    #[test]
    fn hash_key_accepts_primitive_types() {
        assert_eq!(Object::Integer(5).hash_key().unwrap(), HashKey::Integer(5));
        assert_eq!(Object::Boolean(true).hash_key().unwrap(), HashKey::Boolean(true));
        assert_eq!(
            Object::String("hi".into()).hash_key().unwrap(),
            HashKey::String("hi".into())
        );
    }

    #[test]
    fn hash_object_preserves_insertion_order() {
        let mut hash = HashObject::new();
        hash.insert(HashKey::String("b".into()), Object::String("b".into()), Object::Integer(2));
        hash.insert(HashKey::String("a".into()), Object::String("a".into()), Object::Integer(1));
        let keys: Vec<_> = hash.pairs().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["\"b\"", "\"a\""]);
    }
}

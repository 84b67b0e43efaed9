//! Runtime values produced by evaluation.
//!
//! Scalars are stored inline. Strings, lists and maps are shared through
//! `Arc`, so cloning a value (for example when reading it out of an
//! environment) never copies its payload.
//!
//! `List` and `Map` only ever come from the host environment: no operator
//! produces them, and every binary operator rejects them as a type mismatch.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Dynamically typed result of an Ember expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Unsigned 64-bit integer.
    UInt(u64),
    /// 64-bit floating point.
    Double(f64),
    /// 32-bit floating point.
    Float(f32),
    /// Boolean.
    Bool(bool),
    /// Text.
    Str(Arc<str>),
    /// No value: an unbound variable or a failed conversion.
    Absent,
    /// Opaque array from the environment.
    List(Arc<[Value]>),
    /// Opaque string-keyed mapping from the environment.
    Map(Arc<FxHashMap<String, Value>>),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create a list value.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }

    /// Create a map value.
    pub fn map(entries: FxHashMap<String, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Create a map value from any iterator of `(key, value)` pairs.
    pub fn map_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::UInt(_) => "UInt",
            Value::Double(_) => "Double",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Absent => "nil",
            Value::List(_) => "Array",
            Value::Map(_) => "Dictionary",
        }
    }

    /// Number of elements for lists and entries for maps.
    pub fn count(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Render a value nested inside a list or map; strings are quoted there.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// The textual rendering used by the `String(...)` cast.
///
/// Floating values always carry a fractional part (`2.0`, not `2`) so the
/// rendering parses back to the same kind of number.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n:?}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Absent => f.write_str("nil"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                if entries.is_empty() {
                    return f.write_str("[:]");
                }
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                write!(f, "[")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    entries[key].fmt_nested(f)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::UInt(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::UInt(7).to_string(), "7");
        assert_eq!(Value::Double(2.1).to_string(), "2.1");
        assert_eq!(Value::Double(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::string("plain").to_string(), "plain");
        assert_eq!(Value::Absent.to_string(), "nil");
    }

    #[test]
    fn test_display_compound() {
        let list = Value::list(vec![Value::Int(1), Value::string("a")]);
        assert_eq!(list.to_string(), r#"[1, "a"]"#);

        let map = Value::map_from([("b", Value::Int(2)), ("a", Value::Bool(false))]);
        assert_eq!(map.to_string(), r#"["a": false, "b": 2]"#);

        assert_eq!(Value::map(FxHashMap::default()).to_string(), "[:]");
    }

    #[test]
    fn test_count() {
        assert_eq!(Value::list(vec![Value::Int(1); 3]).count(), Some(3));
        assert_eq!(Value::map_from([("k", Value::Absent)]).count(), Some(1));
        assert_eq!(Value::string("abc").count(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(Some(5_i64)), Value::Int(5));
        assert_eq!(Value::from(None::<i64>), Value::Absent);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(0).type_name(), "Int");
        assert_eq!(Value::Double(0.0).type_name(), "Double");
        assert_eq!(Value::Absent.type_name(), "nil");
        assert_eq!(Value::list(vec![]).type_name(), "Array");
    }
}

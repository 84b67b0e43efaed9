//! Read-only variable environment.
//!
//! Variables are looked up by dotted path: `a.b.c` walks nested maps. A
//! trailing `count` segment on a list or map yields its length, even when a
//! map also has an entry named `count`.

use std::sync::Arc;

use ember_ir::Value;
use rustc_hash::FxHashMap;

/// Variables visible to an evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    vars: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Top-level variable by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Resolve a dotted variable path.
    ///
    /// Missing variables, and paths that continue through something other
    /// than a map, resolve to [`Value::Absent`].
    pub fn resolve(&self, path: &str) -> Value {
        if let Some((parent, "count")) = path.rsplit_once('.') {
            if let Some(n) = self.lookup(parent).and_then(Value::count) {
                return i64::try_from(n).map_or(Value::Absent, Value::Int);
            }
        }
        self.lookup(path).cloned().unwrap_or(Value::Absent)
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.vars.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Map(entries) => current = entries.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Build an environment from a JSON value.
    ///
    /// Returns `None` unless `json` is an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(map) => Some(map.into()),
            _ => None,
        }
    }
}

impl From<FxHashMap<String, Value>> for Environment {
    fn from(vars: FxHashMap<String, Value>) -> Self {
        Environment { vars }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Environment {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Environment {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Environment {
            vars: map.into_iter().map(|(k, v)| (k, json_value(v))).collect(),
        }
    }
}

/// Convert a JSON value into an Ember value.
///
/// Integers become `Int` when they fit, then `UInt`; other numbers become
/// `Double`. `null` becomes `Absent`.
pub fn json_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Absent,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                n.as_f64().map_or(Value::Absent, Value::Double)
            }
        }
        serde_json::Value::String(s) => Value::Str(Arc::from(s)),
        serde_json::Value::Array(items) => {
            Value::list(items.into_iter().map(json_value).collect())
        }
        serde_json::Value::Object(map) => {
            Value::map(map.into_iter().map(|(k, v)| (k, json_value(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn customer() -> Environment {
        Environment::from_json(json!({
            "c": {
                "name": "John",
                "items": [1, 1],
                "address": { "city": "Brno" },
                "count": 7
            },
            "n": null
        }))
        .unwrap_or_default()
    }

    #[test]
    fn test_resolve_nested() {
        let env = customer();
        assert_eq!(env.resolve("c.name"), Value::from("John"));
        assert_eq!(env.resolve("c.address.city"), Value::from("Brno"));
    }

    #[test]
    fn test_resolve_missing_is_absent() {
        let env = customer();
        assert_eq!(env.resolve("missing"), Value::Absent);
        assert_eq!(env.resolve("c.missing"), Value::Absent);
        assert_eq!(env.resolve("c.name.first"), Value::Absent);
        assert_eq!(env.resolve("n"), Value::Absent);
    }

    #[test]
    fn test_resolve_count() {
        let env = customer();
        assert_eq!(env.resolve("c.items.count"), Value::Int(2));
        assert_eq!(env.resolve("c.address.count"), Value::Int(1));
        // Count of the map wins over its own `count` entry.
        assert_eq!(env.resolve("c.count"), Value::Int(4));
        assert_eq!(env.resolve("c.name.count"), Value::Absent);
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(json_value(json!(-3)), Value::Int(-3));
        assert_eq!(json_value(json!(u64::MAX)), Value::UInt(u64::MAX));
        assert_eq!(json_value(json!(1.5)), Value::Double(1.5));
    }

    #[test]
    fn test_builder() {
        let env = Environment::new().with("a", 1_i64).with("b", "x");
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("a"), Some(&Value::Int(1)));
        assert!(Environment::from_json(json!([1])).is_none());
    }
}

//! Name-keyed configuration container
//!
//! Entries are stored as `serde_json::Value`s and tagged with a `ValueKind` at
//! read time. There is no schema: a script may store anything the value model
//! can carry, and callers decide the Rust type when they read it back.

use crate::error::LookupError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Runtime type tag of a stored entry
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration values keyed by case-sensitive name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigContainer {
    entries: BTreeMap<String, Value>,
}

impl ConfigContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    /// Replace every entry with `entries`. Later duplicates win.
    pub fn replace_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.entries = entries.into_iter().collect();
    }

    /// Read `name` as `T`.
    ///
    /// Fails with `LookupError::NotFound` if the name was never set and with
    /// `LookupError::TypeMismatch` if the stored value does not deserialize
    /// into `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, LookupError> {
        self.try_get(name)?.ok_or_else(|| LookupError::NotFound {
            name: name.to_string(),
        })
    }

    /// Like `get`, but an absent name is `Ok(None)`.
    pub fn try_get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, LookupError> {
        let Some(value) = self.entries.get(name) else {
            return Ok(None);
        };

        T::deserialize(value)
            .map(Some)
            .map_err(|source| LookupError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
                actual: ValueKind::of(value),
                source,
            })
    }

    /// Like `get`, falling back to `default` when the name was never set.
    pub fn get_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T, LookupError> {
        Ok(self.try_get(name)?.unwrap_or(default))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<ValueKind> {
        self.entries.get(name).map(ValueKind::of)
    }

    /// Stored value without any type conversion
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for ConfigContainer {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for ConfigContainer {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for ConfigContainer {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

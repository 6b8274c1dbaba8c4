use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DumpError;

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    Integer(i64),
    Float(f64),
    /// Repeated value flag, one `--name=<item>` per entry.
    List(Vec<String>),
}

impl OptionValue {
    /// Converts a JSON value, returning `None` for shapes that have no flag
    /// representation (null, objects, arrays holding non-strings).
    pub fn from_json(value: &Value) -> Option<OptionValue> {
        match value {
            Value::Bool(b) => Some(OptionValue::Bool(*b)),
            Value::String(s) => Some(OptionValue::String(s.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(OptionValue::Integer(i)),
                None => n.as_f64().map(OptionValue::Float),
            },
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(OptionValue::List),
            Value::Null | Value::Object(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Integer(i)
    }
}

impl From<i32> for OptionValue {
    fn from(i: i32) -> Self {
        OptionValue::Integer(i.into())
    }
}

impl From<f64> for OptionValue {
    fn from(f: f64) -> Self {
        OptionValue::Float(f)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

/// Options keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct OptionSet {
    entries: Vec<(String, OptionValue)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds an option set from a JSON document that must be an object.
    pub fn from_json(value: &Value) -> Result<OptionSet, DumpError> {
        match value {
            Value::Object(map) => Ok(OptionSet::from(map.clone())),
            other => Err(DumpError::InvalidInput(format!(
                "options must be a key/value object, got {other}"
            ))),
        }
    }
}

impl From<Map<String, Value>> for OptionSet {
    fn from(map: Map<String, Value>) -> Self {
        let mut options = OptionSet::new();
        for (key, value) in map {
            match OptionValue::from_json(&value) {
                Some(v) => {
                    options.set(key, v);
                }
                None => debug!("Ignoring option '{key}' with unsupported value {value}"),
            }
        }
        options
    }
}

impl<K, V> FromIterator<(K, V)> for OptionSet
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = OptionSet::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

//! # Tagged Document Model
//!
//! Entities, job requests and task records are free-form key/value documents.
//! Rather than passing untyped JSON maps around, this module provides a small
//! ordered document type whose values are an explicit variant:
//! null, bool, number, string, array or nested document.
//!
//! Insertion order is preserved, so a document read from a file is written
//! back in the order the user gave it. Overriding an existing key replaces the
//! value in place instead of moving it to the end.
//!
//! Documents convert losslessly to and from `serde_json::Value` and serialize
//! through serde, which gives JSON and YAML output for free.
//!
//! ```
//! use spin_cli::document::{Document, Value};
//!
//! let mut app = Document::new();
//! app.insert("name", "billing");
//! app.insert("email", "owner@example.com");
//! app.insert("name", "payments");
//!
//! assert_eq!(app.get_str("name"), Some("payments"));
//! assert_eq!(app.keys().collect::<Vec<_>>(), vec!["name", "email"]);
//! assert_eq!(app.get("missing"), None);
//! assert!(matches!(app.get("email"), Some(Value::String(_))));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Error;

/// A single value inside a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    Document(Document),
}

impl Value {
    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Document(Document {
                entries: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Value::Document(doc) => JsonValue::from(doc),
        }
    }
}

/// An ordered mapping of string keys to [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonValue", into = "JsonValue")]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the value at `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl From<Document> for JsonValue {
    fn from(doc: Document) -> Self {
        JsonValue::Object(
            doc.entries
                .into_iter()
                .map(|(k, v)| (k, JsonValue::from(v)))
                .collect(),
        )
    }
}

impl TryFrom<JsonValue> for Document {
    type Error = Error;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Document(doc) => Ok(doc),
            other => Err(Error::Protocol {
                message: format!("expected a JSON object, got {}", JsonValue::from(other)),
            }),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", JsonValue::from(self.clone()))
    }
}

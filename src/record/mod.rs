//! Denormalized records
//!
//! A record maps field names to scalar values. It is opaque to the index and
//! plan operators beyond field access by name.
//!
//! Fields are kept in a BTreeMap so iteration and serialization order is
//! deterministic (alphabetical by field name).

mod value;

pub use value::{parse_timestamp, Value};

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised when converting JSON into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Top-level JSON value was not an object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A field held an array or object
    #[error("field '{0}' is not a scalar value")]
    UnsupportedValue(String),
}

/// A single row of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the value of a field, or None if the field is absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the value of a field, reading absent fields as NULL
    pub fn get_or_null(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or(Value::Null)
    }

    /// Iterates fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from one JSON object
    pub fn from_json(json: &serde_json::Value) -> Result<Self, RecordError> {
        let object = match json {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Err(RecordError::NotAnObject("null")),
            serde_json::Value::Bool(_) => return Err(RecordError::NotAnObject("a boolean")),
            serde_json::Value::Number(_) => return Err(RecordError::NotAnObject("a number")),
            serde_json::Value::String(_) => return Err(RecordError::NotAnObject("a string")),
            serde_json::Value::Array(_) => return Err(RecordError::NotAnObject("an array")),
        };

        let mut record = Record::new();
        for (field, raw) in object {
            let value = Value::from_json(raw)
                .ok_or_else(|| RecordError::UnsupportedValue(field.clone()))?;
            record.fields.insert(field.clone(), value);
        }
        Ok(record)
    }

    /// Serializes the record as a JSON object.
    ///
    /// Timestamps come out in RFC 3339 whatever text they were loaded from,
    /// so `2019-08-12 15:22:04 +0900` is written as
    /// `2019-08-12T15:22:04+09:00`. The instant and offset are preserved.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

//! Payload - the top-level render input.
//!
//! A payload is an ordered mapping of named fields. One of them holds the
//! root layout node; the others are available to hooks by name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Value;

/// Errors raised while turning raw input into a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Named payload fields in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    fields: IndexMap<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the serialized (JSON) form.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(Value::from(json))
    }

    /// Accept an already structured value. Only records are payloads.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Record(fields) => Ok(Self { fields }),
            other => Err(PayloadError::NotAnObject {
                found: other.type_name(),
            }),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Record(self.fields)
    }
}

impl TryFrom<Value> for Payload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl TryFrom<serde_json::Value> for Payload {
    type Error = PayloadError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_value(Value::from(json))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

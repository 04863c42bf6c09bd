//! Opaque record identifiers.
//!
//! The record store assigns ids that arrive as JSON numbers from some
//! tables and as strings from others. [`RecordId`] keeps whichever form it
//! was given so it serializes back exactly as received.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An id assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id (`42`).
    Number(i64),
    /// String id (`"42"`, `"rec_abc"`).
    Text(String),
}

impl RecordId {
    /// Interpret a JSON value as an id. Only numbers and non-empty strings
    /// qualify.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Number),
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Whether two ids denote the same record regardless of representation.
    pub fn same_as(&self, other: &RecordId) -> bool {
        self.to_string() == other.to_string()
    }

    /// The id as a JSON value, in its original representation.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::Value::from(*n),
            Self::Text(s) => serde_json::Value::from(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

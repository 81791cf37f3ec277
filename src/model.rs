//! Model snapshots.
//!
//! A model enters validation exactly once per `validate` call: it is
//! serialized into a JSON object and every rule, guard, and derived operand
//! reads that snapshot. Rules never touch the live model, so a failure's
//! attempted value stays stable even if the model changes afterwards.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error produced when a model cannot be captured as an object snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The model failed to serialize at all.
    #[error("model serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The model serialized to something other than a JSON object.
    #[error("model must serialize to a JSON object, got {kind}")]
    NotAnObject {
        /// JSON kind the model serialized to.
        kind: &'static str,
    },
}

/// Immutable per-call view of a model's properties.
///
/// Absent properties read as [`Value::Null`], so rules and guards treat a
/// missing property and an explicitly null one identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSnapshot {
    properties: Map<String, Value>,
}

impl ModelSnapshot {
    /// Captures a serializable model as a snapshot.
    pub fn capture<T: Serialize>(model: &T) -> Result<Self, SnapshotError> {
        match serde_json::to_value(model)? {
            Value::Object(properties) => Ok(Self { properties }),
            other => Err(SnapshotError::NotAnObject {
                kind: value_kind(&other),
            }),
        }
    }

    /// Wraps an already-built property map.
    pub fn from_object(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// Reads a property; absent keys read as `Null`.
    pub fn property(&self, name: &str) -> &Value {
        self.properties.get(name).unwrap_or(&Value::Null)
    }

    /// String view of a property, if it holds one.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.property(name).as_str()
    }

    /// Numeric view of a property, if it holds a number.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.property(name).as_f64()
    }

    /// Boolean view of a property, if it holds one.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.property(name).as_bool()
    }

    /// Array view of a property, if it holds one.
    pub fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.property(name).as_array()
    }

    /// Object view of a property, if it holds one.
    pub fn get_object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.property(name).as_object()
    }

    /// The underlying property map.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.properties
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized work order status '{0}'")]
    UnknownStatus(String),
    #[error("unrecognized priority '{0}'")]
    UnknownPriority(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Per-field validation messages returned by the server when it rejects a
/// write, kept in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<FieldError>,
}

impl FieldErrors {
    /// Returns `None` unless the payload is a JSON object.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        let entries = object
            .iter()
            .map(|(field, value)| FieldError {
                field: field.clone(),
                message: coerce_message(value),
            })
            .collect();
        Some(Self { entries })
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entries: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens an error value into display text.
///
/// Arrays are joined with `,` and nulls inside them render empty, so
/// `["Invalid choice"]` becomes `Invalid choice`. Objects render as compact JSON.
pub fn coerce_message(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_message(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;

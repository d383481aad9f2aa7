//! Typed access to a flattened Scorecard record.
//!
//! The dataset is loose about numeric types: the same field may come back as
//! an integer, a float, a numeric string, or `null`. [`FlatRecord`] accepts all
//! of those and rejects anything else with a [`RecordError`] naming the field.

use serde_json::{Map, Value};

use super::fields;

/// Why a flattened record could not be read.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("required field '{0}' is missing")]
    MissingField(String),
    #[error("field '{field}' is not numeric: {value}")]
    InvalidNumber { field: String, value: String },
    #[error("field '{field}' is not a string: {value}")]
    InvalidString { field: String, value: String },
}

/// Borrowed view over one `{"a.b.c": value, ...}` record.
#[derive(Clone, Copy, Debug)]
pub struct FlatRecord<'a> {
    inner: &'a Map<String, Value>,
}

impl<'a> FlatRecord<'a> {
    pub fn new(value: &'a Value) -> Result<Self, RecordError> {
        value
            .as_object()
            .map(|inner| Self { inner })
            .ok_or(RecordError::NotAnObject)
    }

    /// The record's `id`, which every result carries.
    pub fn id(&self) -> Result<i64, RecordError> {
        let value = self
            .number(fields::ID)?
            .ok_or_else(|| RecordError::MissingField(fields::ID.to_string()))?;
        if value.fract() != 0.0 {
            return Err(RecordError::InvalidNumber {
                field: fields::ID.to_string(),
                value: value.to_string(),
            });
        }
        Ok(value as i64)
    }

    /// A numeric field; `None` when absent, `null`, or an empty string.
    pub fn number(&self, field: &str) -> Result<Option<f64>, RecordError> {
        let invalid = |v: &Value| RecordError::InvalidNumber {
            field: field.to_string(),
            value: v.to_string(),
        };
        match self.inner.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(parsed) => Ok(Some(parsed)),
                None => Err(invalid(&Value::Number(n.clone()))),
            },
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
                    _ => Err(invalid(&Value::String(s.clone()))),
                }
            }
            Some(v) => Err(invalid(v)),
        }
    }

    /// A text field; `None` when absent or `null`.
    pub fn string(&self, field: &str) -> Result<Option<String>, RecordError> {
        match self.inner.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(v) => Err(RecordError::InvalidString {
                field: field.to_string(),
                value: v.to_string(),
            }),
        }
    }

    /// A text field that must be present.
    pub fn required_string(&self, field: &str) -> Result<String, RecordError> {
        self.string(field)?
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }
}

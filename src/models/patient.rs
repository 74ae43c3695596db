//! # Patient Record
//!
//! Patient records arrive loosely typed: vitals may be numbers, numeric
//! strings, sentinel strings, `null`, or missing entirely, and records carry
//! fields the pipeline does not use. [`Patient`] keeps every raw value so the
//! field parser decides what is usable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loosely-typed field value as received from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    /// Booleans, arrays, and objects; never usable as a vital
    Other(Value),
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

/// One patient record from the source collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Preferred identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Value>,

    /// Fallback identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<RawField>,

    /// Expected as `"<systolic>/<diastolic>"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<RawField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<RawField>,

    /// Everything else the source sent, preserved untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patient {
    /// Decode one element of a page's `data` array
    ///
    /// Elements that are not JSON objects become an empty record, which has no
    /// identifier and is therefore skipped by classification.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Patient::default(),
        }
    }

    /// Resolve the stable identifier
    ///
    /// `patient_id` wins whenever it is set to anything other than `null`,
    /// `""`, `0`, or `false`; otherwise `id` is taken. The chosen value must be
    /// a non-empty string, so `{"patient_id": 42, "id": "X1"}` has no usable
    /// identifier.
    pub fn identifier(&self) -> Option<&str> {
        let chosen = self
            .patient_id
            .as_ref()
            .filter(|value| is_set(value))
            .or(self.id.as_ref())?;
        chosen.as_str().filter(|s| !s.is_empty())
    }
}

/// Whether an identifier field counts as present
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

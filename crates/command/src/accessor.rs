//! Guarded, typed access to a template's property list.
//!
//! Older template versions may supply shorter lists than a newer operation
//! expects, so an out-of-range offset reads as "not provided", exactly like
//! a `Null` or empty-string value at that offset.

use mongoplug_core::{json, Property, Value};
use tracing::warn;

use crate::error::Error;
use crate::index::{Field, FieldKind, FieldSpec};
use crate::Result;

/// Value at `offset` if it is present and non-empty.
///
/// Returns `None` for out-of-range offsets, `Null`, and `""`. Never panics.
pub fn value_at(list: &[Property], offset: usize) -> Option<&Value> {
    let value = &list.get(offset)?.value;
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        _ => Some(value),
    }
}

/// Whether a present, non-empty value exists at `offset`.
pub fn has_value(list: &[Property], offset: usize) -> bool {
    value_at(list, offset).is_some()
}

/// A field value after it has been checked against its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text and JSON fields
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl FieldValue {
    /// Kind name of the held value.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "Text",
            FieldValue::Integer(_) => "Integer",
            FieldValue::Boolean(_) => "Boolean",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Take the text of `field`; any other kind is [`Error::KindMismatch`].
    pub fn into_text(self, field: Field) -> Result<String> {
        match self {
            FieldValue::Text(s) => Ok(s),
            other => Err(other.mismatch(field, "Text")),
        }
    }

    /// Take the integer of `field`; any other kind is [`Error::KindMismatch`].
    pub fn into_integer(self, field: Field) -> Result<i64> {
        match self {
            FieldValue::Integer(i) => Ok(i),
            other => Err(other.mismatch(field, "Integer")),
        }
    }

    /// Take the boolean of `field`; any other kind is [`Error::KindMismatch`].
    pub fn into_boolean(self, field: Field) -> Result<bool> {
        match self {
            FieldValue::Boolean(b) => Ok(b),
            other => Err(other.mismatch(field, "Boolean")),
        }
    }

    fn mismatch(&self, field: Field, requested: &str) -> Error {
        Error::KindMismatch {
            field,
            declared: self.kind_name().to_string(),
            requested: requested.to_string(),
        }
    }
}

/// Read the field described by `spec` from `offset`.
///
/// Absent values give `Ok(None)`. A present value that cannot be read as
/// `spec.kind` gives [`Error::WrongType`].
pub fn extract(list: &[Property], offset: usize, spec: &FieldSpec) -> Result<Option<FieldValue>> {
    let value = match value_at(list, offset) {
        Some(value) => value,
        None => return Ok(None),
    };

    match convert(value, spec.kind) {
        Some(converted) => Ok(Some(converted)),
        None => {
            warn!(
                target: "mongoplug::command",
                field = %spec.field,
                offset,
                expected = spec.kind.name(),
                actual = value.type_name(),
                "Rejecting mistyped template value"
            );
            Err(Error::WrongType {
                field: spec.field,
                expected: spec.kind.name().to_string(),
                actual: value.type_name().to_string(),
            })
        }
    }
}

fn convert(value: &Value, kind: FieldKind) -> Option<FieldValue> {
    match kind {
        FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
        FieldKind::Json => match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            // Structured values are rendered back to JSON text, keys in order
            Value::Array(_) | Value::Object(_) => json::value_to_json(value)
                .ok()
                .map(|json| FieldValue::Text(json.to_string())),
            _ => None,
        },
        FieldKind::Integer => match value {
            Value::Int(i) => Some(FieldValue::Integer(*i)),
            Value::Float(f) => integral(*f).map(FieldValue::Integer),
            Value::String(s) => s.trim().parse::<i64>().ok().map(FieldValue::Integer),
            _ => None,
        },
        FieldKind::Boolean => match value {
            Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(FieldValue::Boolean(true)),
                "false" | "no" => Some(FieldValue::Boolean(false)),
                _ => None,
            },
            _ => None,
        },
    }
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

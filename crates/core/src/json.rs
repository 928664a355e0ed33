//! JSON mapping for property values.
//!
//! Templates arrive as plain JSON and every [`Value`] maps onto plain JSON
//! one to one. Object keys keep the order they were written in, since MongoDB
//! gives key order meaning (sort priority, compound index order).
//!
//! | Value | JSON |
//! |-------|------|
//! | Null, Bool, String | same |
//! | Int | integer number |
//! | Float | number (finite only) |
//! | Array | array |
//! | Object | object, keys in insertion order |
//!
//! No key is reserved: `{"$bytes": "..."}` is an ordinary object, as is any
//! other operator-looking key.

use serde::de;
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::Value;

/// Serialize a Value as plain JSON.
///
/// Fails on non-finite floats, which JSON cannot represent.
pub fn serialize_value<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value_to_json(value)
        .map_err(ser::Error::custom)?
        .serialize(serializer)
}

/// Deserialize a Value from plain JSON.
pub fn deserialize_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let json_value = JsonValue::deserialize(deserializer)?;
    Ok(json_to_value(json_value))
}

/// Convert a Value to JSON.
///
/// Returns an error naming the offending float if the value contains NaN or
/// an infinity anywhere.
pub fn value_to_json(value: &Value) -> Result<JsonValue, String> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(i) => Ok(JsonValue::Number((*i).into())),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| format!("Non-finite float {} has no JSON form", f)),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Array(arr) => arr
            .iter()
            .map(value_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| value_to_json(v).map(|json| (k.clone(), json)))
            .collect::<Result<serde_json::Map<_, _>, _>>()
            .map(JsonValue::Object),
    }
}

/// Convert JSON to a Value. Total: every JSON document has a Value.
pub fn json_to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // u64 beyond i64 range lands here too
            None => Value::Float(n.as_f64().unwrap_or(0.0)),
        },
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

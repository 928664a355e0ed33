//! Parsing of JSON field sources while rendering command documents.

use serde_json::{Map, Value as JsonValue};

use crate::error::Error;
use crate::index::Field;
use crate::Result;

/// Default `limit` for find when the template leaves it unset.
pub const DEFAULT_FIND_LIMIT: i64 = 10;
/// Default `skip` for find when the template leaves it unset.
pub const DEFAULT_FIND_SKIP: i64 = 0;
/// Default cursor batch size for aggregate.
pub const DEFAULT_BATCH_SIZE: i64 = 10;

fn parse(field: Field, source: &str) -> Result<JsonValue> {
    serde_json::from_str(source).map_err(|e| Error::InvalidJson {
        field,
        reason: e.to_string(),
    })
}

fn shape_error(field: Field, expected: &str, actual: &JsonValue) -> Error {
    Error::InvalidJson {
        field,
        reason: format!("expected {}, got {}", expected, json_type(actual)),
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// A single JSON object, e.g. a filter or sort specification.
pub(crate) fn object(field: Field, source: &str) -> Result<Map<String, JsonValue>> {
    match parse(field, source)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(shape_error(field, "object", &other)),
    }
}

/// Every element of `items` must be an object.
fn all_objects(field: Field, items: Vec<JsonValue>) -> Result<Vec<JsonValue>> {
    match items.iter().find(|item| !item.is_object()) {
        Some(bad) => Err(shape_error(field, "array of objects", bad)),
        None => Ok(items),
    }
}

/// One object or an array of objects, always returned as a list.
pub(crate) fn object_list(field: Field, source: &str) -> Result<Vec<JsonValue>> {
    match parse(field, source)? {
        JsonValue::Object(map) => Ok(vec![JsonValue::Object(map)]),
        JsonValue::Array(items) => all_objects(field, items),
        other => Err(shape_error(field, "object or array", &other)),
    }
}

/// Like [`object_list`], but the list may not be empty.
pub(crate) fn non_empty_object_list(field: Field, source: &str) -> Result<Vec<JsonValue>> {
    let items = object_list(field, source)?;
    if items.is_empty() {
        return Err(Error::InvalidJson {
            field,
            reason: "expected at least one object, got an empty array".to_string(),
        });
    }
    Ok(items)
}

/// An update specification: an operator object or an aggregation pipeline.
pub(crate) fn update_spec(field: Field, source: &str) -> Result<JsonValue> {
    match parse(field, source)? {
        JsonValue::Object(map) => Ok(JsonValue::Object(map)),
        JsonValue::Array(stages) => all_objects(field, stages).map(JsonValue::Array),
        other => Err(shape_error(field, "object or array", &other)),
    }
}

/// A replacement document, which may not contain update operators.
pub(crate) fn replacement(field: Field, source: &str) -> Result<Map<String, JsonValue>> {
    let map = object(field, source)?;
    if let Some(key) = map.keys().find(|key| key.starts_with('$')) {
        return Err(Error::InvalidJson {
            field,
            reason: format!("replacement document must not contain operator {}", key),
        });
    }
    Ok(map)
}

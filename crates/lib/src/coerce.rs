//! Coercion of dynamic values into fixed types.
//!
//! These functions project a resolved [`Value`] into a concrete type.
//! Numeric coercions accept any numeric representation and narrow or widen
//! freely (floats truncate toward zero when an integer is requested).
//! Everything else requires the exact underlying kind: numbers are never
//! stringified, non-booleans have no truthiness.
//!
//! Errors carry an empty path; the document accessor that resolved the value
//! stamps the full path via [`DocError::with_path`].

use serde_json::{Map, Value};

use crate::errors::DocError;
use crate::path::Path;

/// Coerce to a boolean. Requires an actual boolean.
pub fn to_bool(value: &Value) -> Result<bool, DocError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch("boolean", other)),
    }
}

/// Coerce to a signed 64-bit integer.
///
/// Accepts any number: integral values pass through, floats truncate.
pub fn to_i64(value: &Value) -> Result<i64, DocError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(u) = n.as_u64() {
                Ok(u as i64)
            } else {
                Ok(n.as_f64().unwrap_or_default() as i64)
            }
        }
        other => Err(mismatch("number", other)),
    }
}

/// Coerce to an unsigned 64-bit integer.
///
/// Accepts any non-negative number; floats truncate. Negative values do not
/// fit and are a type mismatch.
pub fn to_u64(value: &Value) -> Result<u64, DocError> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(u)
            } else if let Some(f) = n.as_f64().filter(|f| *f >= 0.0) {
                Ok(f as u64)
            } else {
                Err(mismatch("unsigned number", value))
            }
        }
        other => Err(mismatch("unsigned number", other)),
    }
}

/// Coerce to a 64-bit float. Accepts any number; integers widen.
pub fn to_f64(value: &Value) -> Result<f64, DocError> {
    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or_default()),
        other => Err(mismatch("number", other)),
    }
}

/// Coerce to an owned string. Requires an actual string.
pub fn to_string(value: &Value) -> Result<String, DocError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch("string", other)),
    }
}

/// Coerce to an owned object map. Requires an actual object.
pub fn to_object(value: &Value) -> Result<Map<String, Value>, DocError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        other => Err(mismatch("object", other)),
    }
}

/// Coerce to an owned array. Requires an actual array.
pub fn to_array(value: &Value) -> Result<Vec<Value>, DocError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        other => Err(mismatch("array", other)),
    }
}

/// Coerce to an array of strings.
///
/// Null elements map to the empty string; any other non-string element is a
/// type mismatch naming the offending element.
pub fn to_string_array(value: &Value) -> Result<Vec<String>, DocError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(mismatch("array", other)),
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => strings.push(String::new()),
            Value::String(s) => strings.push(s.clone()),
            other => return Err(mismatch("string", other)),
        }
    }
    Ok(strings)
}

#[inline]
fn mismatch(expected: &'static str, value: &Value) -> DocError {
    DocError::type_mismatch(Path::root(), expected, value)
}

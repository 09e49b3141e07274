//! Flattening of JSON payloads into `key=value` pairs, for query strings and form bodies.

use crate::Error;
use serde_json::Value;

/// Flattens a JSON object into a list of `(key, value)` pairs.
///
/// Nested objects and arrays use bracket notation (`line_items[0][quantity]`),
/// `null` values are skipped and `Value::Null` itself yields no pairs.
pub(crate) fn flatten(value: &Value) -> Result<Vec<(String, String)>, Error> {
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::InvalidPayload(format!(
                "expected a JSON object, got {}",
                kind(other)
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        push_pairs(&mut pairs, key.clone(), value);
    }

    Ok(pairs)
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{}[{}]", key, i), item);
            }
        }
        Value::Object(map) => {
            for (k, item) in map {
                push_pairs(pairs, format!("{}[{}]", key, k), item);
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

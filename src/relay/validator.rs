//! Required-field presence checks.
//!
//! A field counts as present only when its value is truthy: absent keys,
//! `null`, `false`, numeric zero and `""` are all reported missing.
//! Arrays and objects are truthy even when empty.

use serde_json::{Map, Value};

/// Loose truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Return the required fields that are missing from `body`, in `required` order.
pub fn missing_fields(body: &Map<String, Value>, required: &'static [&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !body.get(*field).is_some_and(is_truthy))
        .collect()
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use serde_json::Value;

/// Returns whether a JSON value counts as "set"
///
/// `null`, `false`, `0`, `NaN` and the empty string are unset; every other
/// value, including empty arrays and objects, is set.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders an id as a path segment
///
/// Returns `None` for unset ids. Strings are used verbatim, anything else in
/// its JSON form.
#[must_use]
pub fn id_segment(id: Option<&Value>) -> Option<String> {
    match id {
        Some(value) if is_truthy(value) => Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        _ => None,
    }
}

/// Extracts the first set string among the aliased keys of an object
#[must_use]
pub fn first_string(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

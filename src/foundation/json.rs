//! Lenient accessors over loosely-typed JSON payloads.
//!
//! Step producers are not consistent about representation: ids arrive as strings or
//! numbers, indices as numbers or numeric strings, collections under one of several
//! field names. These helpers fold those variations into one place.

use serde_json::Value;

/// Return the first key in `keys` whose value is present and not `null`.
pub(crate) fn first_field<'a>(obj: &'a Value, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    let map = obj.as_object()?;
    keys.iter()
        .find_map(|&k| map.get(k).filter(|v| !v.is_null()).map(|v| (k, v)))
}

/// Integer index from a number (no fractional part) or a numeric string.
pub(crate) fn as_index(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Finite float from a number or a numeric string.
pub(crate) fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Identifier from a non-empty string or a number.
pub(crate) fn as_id(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Human-readable rendering of a scalar (strings without quotes).
pub(crate) fn display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A single string or an array of strings/ids, flattened.
pub(crate) fn string_list(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items.iter().filter_map(as_id).collect(),
        _ => Vec::new(),
    }
}

/// Optional identifier field on an object.
pub(crate) fn id_field(obj: &Value, keys: &[&'static str]) -> Option<String> {
    first_field(obj, keys).and_then(|(_, v)| as_id(v))
}

/// Optional string field on an object.
pub(crate) fn str_field(obj: &Value, keys: &[&'static str]) -> Option<String> {
    first_field(obj, keys)
        .and_then(|(_, v)| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `true` when `v` is a non-empty array whose first element is itself an array.
pub(crate) fn is_table(v: &Value) -> bool {
    v.as_array()
        .and_then(|rows| rows.first())
        .is_some_and(Value::is_array)
}

/// Number of entries in an array or object; `0` for anything else.
pub(crate) fn collection_len(v: &Value) -> usize {
    match v {
        Value::Array(a) => a.len(),
        Value::Object(o) => o.len(),
        _ => 0,
    }
}

/// Short name of the JSON kind, used in type-mismatch messages.
pub(crate) fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/json.rs"]
mod tests;

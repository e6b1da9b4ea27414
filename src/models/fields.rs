//! Permissive field access on JSON records
//!
//! Optional attributes never fail construction: a missing key, a JSON `null`
//! or a value of an unusable type all resolve to `None` (or an empty list).

use serde_json::{Map, Value};

/// A JSON object as returned by the catalog
pub type Record = Map<String, Value>;

/// String field; numbers and booleans are rendered as text
pub(crate) fn opt_string(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Requirement flag; accepts booleans and the catalog's requirement levels
pub(crate) fn opt_bool(record: &Record, key: &str) -> Option<bool> {
    match record.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "required" => Some(true),
            "false" | "no" | "recommended" | "optional" | "conditional" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Integer field; accepts numeric strings
pub(crate) fn opt_i64(record: &Record, key: &str) -> Option<i64> {
    match record.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// List of strings; non-string entries are skipped
pub(crate) fn string_list(record: &Record, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Any non-null value, passed through untouched
pub(crate) fn opt_value(record: &Record, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

/// Identity key; only non-empty strings qualify
pub(crate) fn identity(record: &Record, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

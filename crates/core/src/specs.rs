//! Spec reconciliation: turning raw stored rows into ordered spec lists
//! and normalizing free-text descriptions to and from the stored form.
//!
//! Stored rows are loosely-typed JSON maps because every category table
//! has its own column set; this module owns the canonical-then-alias field
//! lookup and the omission rules, which rendering depends on exactly.

use serde_json::{Map, Value};

use crate::registry::Category;

/// One resolved spec line for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Spec {
    pub label: String,
    pub value: String,
}

/// Stringify a JSON value the way spec values are rendered: strings pass
/// through, scalars via their display form, `null` is absent.
fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// True when a stringified value survives display cleaning.
fn is_presentable(v: &str) -> bool {
    let v = v.trim();
    !v.is_empty() && v != "null" && v != "undefined"
}

/// Look up a field on a raw row: canonical key first, then each alias in
/// declared order. Keys that are absent, null, or clean to nothing are
/// skipped, so a populated alias still surfaces behind an emptied
/// canonical column.
fn pick_value(row: &Map<String, Value>, key: &str, aliases: &[&str]) -> Option<String> {
    std::iter::once(key)
        .chain(aliases.iter().copied())
        .filter_map(|k| row.get(k))
        .filter_map(value_to_string)
        .find(|v| is_presentable(v))
}

/// Extract the ordered `(label, value)` spec list for a row.
///
/// Walks the category's field definitions in declared order; a field is
/// omitted when its canonical key and every alias are absent, null, or
/// trim to empty / `"null"` / `"undefined"`. A non-empty `model_name`
/// contributes a synthetic 모델명 entry before all declared fields.
pub fn extract_specs(row: &Map<String, Value>, category: Category) -> Vec<Spec> {
    let mut specs = Vec::new();

    let mut push = |label: &str, value: Option<String>| {
        if let Some(v) = value {
            let v = v.trim();
            if !v.is_empty() && v != "null" && v != "undefined" {
                specs.push(Spec {
                    label: label.to_string(),
                    value: v.to_string(),
                });
            }
        }
    };

    if let Some(model) = row.get("model_name").and_then(value_to_string) {
        push("모델명", Some(model));
    }

    for field in category.spec_fields() {
        push(field.label, pick_value(row, field.key, field.aliases));
    }

    specs
}

/// Normalize operator-entered description text into its stored form: a
/// JSON array of trimmed, non-empty lines serialized as one string.
///
/// Input that already looks like a JSON array is re-serialized element by
/// element; a parse failure on array-looking input falls through to plain
/// line splitting. Returns `None` when nothing survives, which is stored
/// as SQL NULL.
pub fn normalize_description(desc: &str) -> Option<String> {
    let raw = desc.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with('[') && raw.ends_with(']') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
            let clean: Vec<String> = items
                .iter()
                .filter_map(value_to_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            return if clean.is_empty() {
                None
            } else {
                Some(serde_json::to_string(&clean).unwrap_or_default())
            };
        }
    }

    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&lines).unwrap_or_default())
    }
}

/// Best-effort inverse of [`normalize_description`]: a stored value back
/// into ordered description lines.
///
/// Accepts an already-parsed array, a string holding a JSON array, or a
/// bare string (one line). Blanks are dropped.
pub fn parse_description(stored: &Value) -> Vec<String> {
    match stored {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Vec::new();
            }
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(t) {
                return items
                    .iter()
                    .filter_map(value_to_string)
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            vec![t.to_string()]
        }
        _ => Vec::new(),
    }
}

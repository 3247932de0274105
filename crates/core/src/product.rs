//! Admin product input: required-field validation and spec-bag resolution.

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::CoreError;
use crate::registry::Category;

/// Common fields of an admin create/update submission, after multipart
/// decoding and trimming. Spec values travel separately as a raw JSON map.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub product_name: String,
    pub product_code: Option<String>,
    pub description: String,
    pub model_name: Option<String>,
}

impl ProductInput {
    /// Check required fields, reporting every missing one by name.
    pub fn validate_required(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errs| {
            let mut missing: Vec<String> =
                errs.field_errors().keys().map(|k| k.to_string()).collect();
            missing.sort_unstable();
            CoreError::Validation(format!("missing required fields: {}", missing.join(", ")))
        })
    }
}

/// Resolve a raw spec-value bag against a category's declared fields.
///
/// Every key must be a canonical key or a declared alias of the category;
/// anything else is rejected rather than written through, so rows never
/// grow columns the registry does not know about. The result covers every
/// declared field in order, `None` where the submission carried nothing,
/// because an update replaces the spec set wholesale.
pub fn resolve_specs(
    category: Category,
    raw: &Map<String, Value>,
) -> Result<Vec<(&'static str, Option<String>)>, CoreError> {
    let fields = category.spec_fields();
    let mut resolved: Vec<(&'static str, Option<String>)> =
        fields.iter().map(|f| (f.key, None)).collect();

    for (key, value) in raw {
        let canonical = fields
            .iter()
            .find(|f| f.key == key || f.aliases.contains(&key.as_str()))
            .map(|f| f.key)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown spec field '{key}' for category '{}'",
                    category.key()
                ))
            })?;

        let text = match value {
            Value::Null => None,
            Value::String(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            other => Some(other.to_string()),
        };

        if let Some(slot) = resolved.iter_mut().find(|(k, _)| *k == canonical) {
            slot.1 = text;
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn input(slug: &str, name: &str) -> ProductInput {
        ProductInput {
            slug: slug.to_string(),
            product_name: name.to_string(),
            product_code: None,
            description: String::new(),
            model_name: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input("toplight-001", "Beacon X").validate_required().is_ok());
    }

    #[test]
    fn missing_fields_are_named() {
        let err = input("", "").validate_required().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("product_name"), "{msg}");
            assert!(msg.contains("slug"), "{msg}");
        });
    }

    #[test]
    fn resolve_maps_canonical_keys() {
        let raw = json!({"voltage": "24V"});
        let specs = resolve_specs(Category::Toplight, raw.as_object().unwrap()).unwrap();
        assert_eq!(
            specs.iter().find(|(k, _)| *k == "voltage").unwrap().1,
            Some("24V".to_string())
        );
        // Unsubmitted fields come back as explicit Nones.
        assert_eq!(specs.len(), Category::Toplight.spec_fields().len());
        assert!(specs.iter().filter(|(_, v)| v.is_some()).count() == 1);
    }

    #[test]
    fn resolve_folds_aliases_onto_canonical_column() {
        let raw = json!({"productOutput": "3W"});
        let specs = resolve_specs(Category::Toplight, raw.as_object().unwrap()).unwrap();
        assert_eq!(
            specs.iter().find(|(k, _)| *k == "product_output").unwrap().1,
            Some("3W".to_string())
        );
    }

    #[test]
    fn resolve_rejects_unknown_keys() {
        let raw = json!({"voltage": "24V", "wattage": "10W"});
        let err = resolve_specs(Category::Toplight, raw.as_object().unwrap()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("wattage"), "{msg}");
        });
    }

    #[test]
    fn resolve_blank_values_become_none() {
        let raw = json!({"voltage": "  "});
        let specs = resolve_specs(Category::Toplight, raw.as_object().unwrap()).unwrap();
        assert_eq!(specs.iter().find(|(k, _)| *k == "voltage").unwrap().1, None);
    }
}

//! Structural validation for field bindings
//!
//! A binding is usable for generation only when it references at least one
//! dimension and one measure. The generator itself does not enforce this;
//! the validation endpoint is the single place the invariant is checked.

use serde::Serialize;

use crate::model::{BoundField, FieldClassification};

/// Result of validating a binding's field list
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a field list structurally.
///
/// Errors make the binding unusable; warnings flag likely configuration
/// gaps without blocking it.
pub fn validate_binding_fields(fields: &[BoundField]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if fields.is_empty() {
        errors.push("Binding must define at least one field".to_string());
    }

    for (index, field) in fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            errors.push(format!("Field at position {} has an empty name", index));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for field in fields {
        let key = field.name.trim().to_ascii_lowercase();
        if !key.is_empty() && !seen.insert(key) {
            errors.push(format!("Duplicate field name: {}", field.name));
        }
    }

    let dimensions = fields
        .iter()
        .filter(|f| f.classification == FieldClassification::Dimension)
        .count();
    let measures = fields
        .iter()
        .filter(|f| f.classification == FieldClassification::Measure)
        .count();
    let parameters = fields
        .iter()
        .filter(|f| f.classification == FieldClassification::Parameter)
        .count();

    if !fields.is_empty() {
        if dimensions == 0 {
            errors.push("Binding must include at least one dimension field".to_string());
        }
        if measures == 0 {
            errors.push("Binding must include at least one measure field".to_string());
        }
        if parameters == 0 {
            warnings.push("Binding defines no parameter fields".to_string());
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

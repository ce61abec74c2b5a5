//! Form-level submission validation.
//!
//! Checks captured values against the field definitions before a context is
//! built: required, *visible* fields must carry a non-empty value. Hidden
//! fields are exempt — a field the user never saw cannot block submission.

use std::collections::HashMap;

use scribe_core::{FieldValue, FormConfig};

use crate::errors::EngineError;
use crate::filter::evaluate;

/// Validate captured values against the form's field definitions.
pub fn validate_submission(
    config: &FormConfig,
    id_values: &HashMap<String, FieldValue>,
) -> Result<(), EngineError> {
    let mut violations = Vec::new();

    for field in &config.fields {
        if !field.required {
            continue;
        }
        if let Some(condition) = &field.condition {
            if !evaluate(condition, id_values) {
                continue;
            }
        }
        let missing = id_values.get(&field.id).is_none_or(FieldValue::is_empty);
        if missing {
            violations.push(format!("field '{}' is required", field.label));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation { violations })
    }
}

#[cfg(test)]
mod tests {
    use scribe_core::{ConditionOperator, FieldKind, Filter, FormField};

    use super::*;

    fn required(id: &str, label: &str) -> FormField {
        let mut field = FormField::new(id, label, FieldKind::Text);
        field.required = true;
        field
    }

    #[test]
    fn passes_when_required_fields_present() {
        let mut config = FormConfig::new();
        config.fields = vec![required("f1", "Title")];
        let mut values = HashMap::new();
        let _ = values.insert("f1".to_string(), FieldValue::from("x"));
        assert!(validate_submission(&config, &values).is_ok());
    }

    #[test]
    fn reports_missing_and_empty_required_fields() {
        let mut config = FormConfig::new();
        config.fields = vec![required("f1", "Title"), required("f2", "Body")];
        let mut values = HashMap::new();
        let _ = values.insert("f2".to_string(), FieldValue::Text(String::new()));

        let err = validate_submission(&config, &values).unwrap_err();
        match err {
            EngineError::Validation { violations } => {
                assert_eq!(
                    violations,
                    vec!["field 'Title' is required", "field 'Body' is required"]
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn hidden_required_field_is_exempt() {
        let mut hidden = required("f2", "Details");
        hidden.condition = Some(Filter::condition("f1", ConditionOperator::Eq, true));
        let mut config = FormConfig::new();
        config.fields = vec![FormField::new("f1", "Enabled", FieldKind::Toggle), hidden];

        let mut values = HashMap::new();
        let _ = values.insert("f1".to_string(), FieldValue::Bool(false));
        assert!(validate_submission(&config, &values).is_ok());
    }

    #[test]
    fn optional_fields_never_block() {
        let mut config = FormConfig::new();
        config.fields = vec![FormField::new("f1", "Title", FieldKind::Text)];
        assert!(validate_submission(&config, &HashMap::new()).is_ok());
    }
}

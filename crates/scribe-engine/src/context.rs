//! The per-run execution context.
//!
//! Built once per submission, mutated in place only through
//! `output_variables`, discarded when the run ends. The id- and label-keyed
//! maps are the *visibility snapshot*: computed before the first action
//! executes and never recomputed mid-run, so every skip decision in a run
//! sees the same values.

use std::collections::HashMap;
use std::sync::Arc;

use scribe_core::{FieldValue, FormConfig};

use crate::filter::evaluate;

/// The mutable record threaded through an action chain.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    /// The configuration this run executes. Immutable during the run.
    pub config: Arc<FormConfig>,
    /// Field id → captured value, restricted to visible fields. Source of
    /// truth for conditional-skip decisions.
    pub id_values: HashMap<String, FieldValue>,
    /// Field label → captured value, restricted to visible fields. The
    /// lookup map for template expressions.
    pub values: HashMap<String, FieldValue>,
    /// Values written by handlers during this run, visible to all
    /// subsequent handlers. Empty at start.
    pub output_variables: HashMap<String, FieldValue>,
}

impl ExecutionContext {
    /// Build a context from raw captured values, computing the visibility
    /// snapshot: fields whose own condition evaluates false against the raw
    /// id map are excluded from both maps.
    pub fn new(config: Arc<FormConfig>, raw_id_values: HashMap<String, FieldValue>) -> Self {
        let mut id_values = HashMap::new();
        let mut values = HashMap::new();

        for field in &config.fields {
            if let Some(condition) = &field.condition {
                if !evaluate(condition, &raw_id_values) {
                    continue;
                }
            }
            let value = raw_id_values
                .get(&field.id)
                .cloned()
                .unwrap_or(FieldValue::Null);
            let _ = id_values.insert(field.id.clone(), value.clone());
            let _ = values.insert(field.label.clone(), value);
        }

        Self {
            config,
            id_values,
            values,
            output_variables: HashMap::new(),
        }
    }

    /// Look up a template variable: the label snapshot first, then output
    /// variables written earlier in the run.
    pub fn lookup(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .get(name)
            .or_else(|| self.output_variables.get(name))
    }
}

/// Captured values derived purely from field defaults, for unattended
/// submissions.
pub fn default_id_values(config: &FormConfig) -> HashMap<String, FieldValue> {
    let mut id_values = HashMap::new();
    for field in &config.fields {
        let value = field.default_value.clone().unwrap_or(FieldValue::Null);
        let _ = id_values.insert(field.id.clone(), value);
    }
    id_values
}

/// Whether every field has a usable default, making the form eligible for
/// auto-submission without prompting.
pub fn all_fields_defaulted(config: &FormConfig) -> bool {
    config
        .fields
        .iter()
        .all(|field| field.default_value.as_ref().is_some_and(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use scribe_core::{ConditionOperator, FieldKind, Filter, FormField};

    use super::*;

    fn config_with_fields(fields: Vec<FormField>) -> Arc<FormConfig> {
        let mut config = FormConfig::new();
        config.fields = fields;
        config.actions.clear();
        Arc::new(config)
    }

    #[test]
    fn snapshot_keys_by_id_and_label() {
        let config = config_with_fields(vec![FormField::new("f1", "Title", FieldKind::Text)]);
        let mut raw = HashMap::new();
        let _ = raw.insert("f1".to_string(), FieldValue::from("My note"));

        let ctx = ExecutionContext::new(config, raw);
        assert_eq!(ctx.id_values.get("f1"), Some(&FieldValue::from("My note")));
        assert_eq!(ctx.values.get("Title"), Some(&FieldValue::from("My note")));
    }

    #[test]
    fn hidden_field_is_excluded_from_snapshot() {
        let mut hidden = FormField::new("f2", "Details", FieldKind::Text);
        hidden.condition = Some(Filter::condition("f1", ConditionOperator::Eq, true));
        let config = config_with_fields(vec![
            FormField::new("f1", "Enabled", FieldKind::Toggle),
            hidden,
        ]);

        let mut raw = HashMap::new();
        let _ = raw.insert("f1".to_string(), FieldValue::Bool(false));
        let _ = raw.insert("f2".to_string(), FieldValue::from("secret"));

        let ctx = ExecutionContext::new(config, raw);
        assert!(!ctx.id_values.contains_key("f2"));
        assert!(!ctx.values.contains_key("Details"));
        assert!(ctx.id_values.contains_key("f1"));
    }

    #[test]
    fn unanswered_field_snapshots_as_null() {
        let config = config_with_fields(vec![FormField::new("f1", "Title", FieldKind::Text)]);
        let ctx = ExecutionContext::new(config, HashMap::new());
        assert_eq!(ctx.id_values.get("f1"), Some(&FieldValue::Null));
    }

    #[test]
    fn lookup_prefers_snapshot_then_outputs() {
        let config = config_with_fields(vec![FormField::new("f1", "Title", FieldKind::Text)]);
        let mut raw = HashMap::new();
        let _ = raw.insert("f1".to_string(), FieldValue::from("captured"));
        let mut ctx = ExecutionContext::new(config, raw);
        let _ = ctx
            .output_variables
            .insert("summary".to_string(), FieldValue::from("generated"));

        assert_eq!(ctx.lookup("Title"), Some(&FieldValue::from("captured")));
        assert_eq!(ctx.lookup("summary"), Some(&FieldValue::from("generated")));
        assert_eq!(ctx.lookup("missing"), None);
    }

    #[test]
    fn default_id_values_uses_field_defaults() {
        let mut field = FormField::new("f1", "Title", FieldKind::Text);
        field.default_value = Some(FieldValue::from("Untitled"));
        let config = config_with_fields(vec![
            field,
            FormField::new("f2", "Body", FieldKind::TextArea),
        ]);

        let defaults = default_id_values(&config);
        assert_eq!(defaults.get("f1"), Some(&FieldValue::from("Untitled")));
        assert_eq!(defaults.get("f2"), Some(&FieldValue::Null));
    }

    #[test]
    fn all_fields_defaulted_requires_non_empty_defaults() {
        let mut with_default = FormField::new("f1", "Title", FieldKind::Text);
        with_default.default_value = Some(FieldValue::from("Untitled"));
        let config = config_with_fields(vec![with_default.clone()]);
        assert!(all_fields_defaulted(&config));

        let mut empty_default = FormField::new("f2", "Body", FieldKind::Text);
        empty_default.default_value = Some(FieldValue::Text(String::new()));
        let config = config_with_fields(vec![with_default, empty_default]);
        assert!(!all_fields_defaulted(&config));
    }
}

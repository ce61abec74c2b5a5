//! Form field definitions.
//!
//! A [`FormField`] is one typed input slot. The [`FieldKind`] tag is closed:
//! adding a kind is a compile-time exhaustiveness requirement on every
//! consumer. Type-specific attributes live on the variant payload.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::values::FieldValue;

/// The closed set of field types, with type-specific attributes on the
/// variant payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Numeric input.
    Number,
    /// Calendar date (ISO `YYYY-MM-DD` text).
    Date,
    /// Time of day (`HH:MM` text).
    Time,
    /// Combined date and time.
    DateTime,
    /// On/off switch producing a boolean.
    Toggle,
    /// Single choice from a fixed option list.
    #[serde(rename_all = "camelCase")]
    Select {
        /// The selectable options.
        #[serde(default)]
        options: Vec<String>,
    },
    /// Multiple choices from a fixed option list.
    #[serde(rename_all = "camelCase")]
    MultiSelect {
        /// The selectable options.
        #[serde(default)]
        options: Vec<String>,
    },
    /// One or more document references.
    #[serde(rename_all = "camelCase")]
    FileList {
        /// Whether more than one file may be selected.
        #[serde(default)]
        multiple: bool,
        /// When set, template expressions referencing this field resolve to
        /// the referenced documents' contents instead of their paths.
        #[serde(default)]
        extract_content: bool,
    },
}

impl FieldKind {
    /// Whether expressions referencing this field dereference file contents.
    pub fn extracts_content(&self) -> bool {
        matches!(
            self,
            Self::FileList {
                extract_content: true,
                ..
            }
        )
    }
}

/// One typed input slot in a form.
///
/// The `id` is the stable identity used by condition trees; the `label` is
/// the human-facing name and the resolution key for template expressions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Stable identity, referenced by conditions.
    pub id: String,
    /// Human-facing name; the lookup key for `{{@Label}}` expressions.
    pub label: String,
    /// Field type tag plus type-specific attributes.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Value used when the submission leaves this field unanswered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    /// Whether a submission without a value for this field is rejected.
    #[serde(default)]
    pub required: bool,
    /// Visibility condition; a field whose condition evaluates false is
    /// excluded from the run's value snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Filter>,
}

impl FormField {
    /// Create a field with the given id, label and kind; no default, not
    /// required, always visible.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            default_value: None,
            required: false,
            condition: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_serializes_camel_case() {
        let field = FormField::new("f1", "Name", FieldKind::TextArea);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "textArea");
        assert_eq!(json["id"], "f1");
        assert_eq!(json["label"], "Name");
    }

    #[test]
    fn file_list_payload_roundtrip() {
        let field = FormField::new(
            "f2",
            "Sources",
            FieldKind::FileList {
                multiple: true,
                extract_content: true,
            },
        );
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"extractContent\":true"));
        let back: FormField = serde_json::from_str(&json).unwrap();
        assert_eq!(field, back);
    }

    #[test]
    fn extracts_content_only_when_flag_set() {
        assert!(FieldKind::FileList {
            multiple: false,
            extract_content: true
        }
        .extracts_content());
        assert!(!FieldKind::FileList {
            multiple: false,
            extract_content: false
        }
        .extracts_content());
        assert!(!FieldKind::Text.extracts_content());
    }

    #[test]
    fn deserializes_minimal_field() {
        let field: FormField =
            serde_json::from_str(r#"{"id": "a", "label": "A", "type": "text"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert!(!field.required);
        assert!(field.default_value.is_none());
        assert!(field.condition.is_none());
    }
}

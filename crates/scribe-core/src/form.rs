//! The form configuration document.
//!
//! A [`FormConfig`] is the declarative description of one workflow: ordered
//! fields, ordered actions, and submission flags. It is loaded wholesale
//! from a JSON document before a run and never mutated during one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{ActionKind, ConflictPolicy, ContentSource, FormAction};
use crate::field::FormField;

/// One workflow: typed input fields plus an ordered action list.
///
/// Action order is significant and is the only execution ordering signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Stable identity of this form.
    pub id: String,
    /// Ordered input fields.
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Ordered automation steps.
    #[serde(default)]
    pub actions: Vec<FormAction>,
    /// When set and every field has a usable default, the form runs without
    /// prompting for input.
    #[serde(default)]
    pub auto_submit: bool,
    /// Whether a success notice is shown after a completed run.
    #[serde(default = "default_true")]
    pub show_submit_message: bool,
}

fn default_true() -> bool {
    true
}

impl FormConfig {
    /// Create an empty form with a generated id and a single default
    /// create-file action.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            fields: Vec::new(),
            actions: vec![FormAction::new(ActionKind::CreateFile {
                target_folder: String::new(),
                file_name: String::new(),
                content_source: ContentSource::Inline,
                content: String::new(),
                template_file: String::new(),
                on_conflict: ConflictPolicy::Error,
            })],
            auto_submit: false,
            show_submit_message: true,
        }
    }

    /// Find a field by its stable id.
    pub fn field_by_id(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Find a field by its label (the template resolution key).
    pub fn field_by_label(&self, label: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new()
    }
}

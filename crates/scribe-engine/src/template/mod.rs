//! The template expression engine.
//!
//! Resolves `{{@Name}}` placeholders against the run's value snapshot and
//! output variables, dereferences file-reference fields to document
//! contents, substitutes the built-in `{{selection}}` and `{{clipboard}}`
//! tokens, and hands the result to the opaque macro processor for ambient
//! tokens.
//!
//! Error policy: everything in here is soft. Unresolved names become the
//! empty string, unreadable references become inline markers, and the
//! engine never aborts the surrounding action.

pub mod extract;
pub mod scanner;

use std::sync::Arc;

use scribe_core::FieldValue;
use tracing::warn;

use crate::context::ExecutionContext;
use crate::traits::{Clipboard, EditorOps, MacroProcessor, VaultOps};

use self::scanner::Segment;

/// Built-in token replaced with the active editor selection.
const SELECTION_TOKEN: &str = "{{selection}}";
/// Built-in token replaced with clipboard text.
const CLIPBOARD_TOKEN: &str = "{{clipboard}}";

/// Resolves placeholders in user-authored text against a run's context.
pub struct TemplateEngine {
    vault: Arc<dyn VaultOps>,
    clipboard: Arc<dyn Clipboard>,
    editor: Arc<dyn EditorOps>,
    macros: Arc<dyn MacroProcessor>,
}

impl TemplateEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        vault: Arc<dyn VaultOps>,
        clipboard: Arc<dyn Clipboard>,
        editor: Arc<dyn EditorOps>,
        macros: Arc<dyn MacroProcessor>,
    ) -> Self {
        Self {
            vault,
            clipboard,
            editor,
            macros,
        }
    }

    /// Resolve text to a value.
    ///
    /// When the whole input is a single `{{@Name}}` placeholder the bound
    /// value passes through with its type intact (lists stay lists), so
    /// downstream consumers that expect, say, a list of paths are not
    /// handed a comma-joined string. Any other input resolves to text.
    pub async fn resolve(&self, text: &str, ctx: &ExecutionContext) -> FieldValue {
        if text.is_empty() {
            return FieldValue::Text(String::new());
        }

        if let Some(name) = exact_expression(text) {
            return self.resolve_exact(name, ctx).await;
        }

        FieldValue::Text(self.resolve_embedded(text, ctx).await)
    }

    /// Resolve text to a string (the common case for path and content
    /// fields).
    pub async fn resolve_text(&self, text: &str, ctx: &ExecutionContext) -> String {
        self.resolve(text, ctx).await.to_string()
    }

    /// The exact-match fast path: the raw, untyped binding.
    async fn resolve_exact(&self, name: &str, ctx: &ExecutionContext) -> FieldValue {
        let Some(value) = ctx.lookup(name) else {
            return FieldValue::Text(String::new());
        };
        if matches!(value, FieldValue::Null) {
            return FieldValue::Text(String::new());
        }
        if self.field_extracts_content(name, ctx) {
            return FieldValue::Text(extract::extract_contents(&self.vault, value).await);
        }
        value.clone()
    }

    /// The embedded scan: placeholders stringified into surrounding text,
    /// then built-in tokens, then the ambient macro pass.
    async fn resolve_embedded(&self, text: &str, ctx: &ExecutionContext) -> String {
        let mut result = String::with_capacity(text.len());

        for segment in scanner::scan(text) {
            match segment {
                Segment::Literal(literal) => result.push_str(literal),
                Segment::Expression(name) => {
                    result.push_str(&self.resolve_name(name, ctx).await);
                }
            }
        }

        if result.contains(SELECTION_TOKEN) {
            let selection = self.editor.selection();
            result = result.replacen(SELECTION_TOKEN, &selection, 1);
        }

        if result.contains(CLIPBOARD_TOKEN) {
            let clipboard = match self.clipboard.read_text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "clipboard read failed, substituting empty text");
                    String::new()
                }
            };
            result = result.replacen(CLIPBOARD_TOKEN, &clipboard, 1);
        }

        self.macros.process(&result)
    }

    /// Resolve one bare variable name to display text.
    async fn resolve_name(&self, name: &str, ctx: &ExecutionContext) -> String {
        let Some(value) = ctx.lookup(name) else {
            return String::new();
        };
        if matches!(value, FieldValue::Null) {
            return String::new();
        }
        if self.field_extracts_content(name, ctx) {
            return extract::extract_contents(&self.vault, value).await;
        }
        value.to_string()
    }

    /// Whether the field behind a label dereferences file contents.
    fn field_extracts_content(&self, label: &str, ctx: &ExecutionContext) -> bool {
        ctx.config
            .field_by_label(label)
            .is_some_and(|field| field.kind.extracts_content())
    }
}

/// If the whole input is a single placeholder, its body; otherwise `None`.
fn exact_expression(text: &str) -> Option<&str> {
    let body = text.strip_prefix("{{@")?.strip_suffix("}}")?;
    (!body.is_empty() && !body.contains('}')).then_some(body)
}

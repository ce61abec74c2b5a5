//! `insertText` handler — inserts resolved text into an existing document.
//!
//! Insertion points: top (after front matter), bottom, or directly under a
//! named heading. The target must already exist; a missing document is a
//! hard failure.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FormAction, InsertPosition};
use tracing::debug;

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::template::extract::split_front_matter;
use crate::traits::VaultOps;

use super::util::resolve_note_path;

/// Inserts text into a document.
pub struct InsertTextHandler {
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
}

impl InsertTextHandler {
    /// Create a handler over the given vault and template engine.
    pub fn new(vault: Arc<dyn VaultOps>, engine: Arc<TemplateEngine>) -> Self {
        Self { vault, engine }
    }
}

/// Splice `text` into `document` at the given position.
fn insert_into(document: &str, text: &str, position: &InsertPosition) -> String {
    match position {
        InsertPosition::Bottom => {
            let mut result = document.to_string();
            if !result.is_empty() && !result.ends_with('\n') {
                result.push('\n');
            }
            result.push_str(text);
            if !text.ends_with('\n') {
                result.push('\n');
            }
            result
        }
        InsertPosition::Top => {
            let (front_matter, body) = split_front_matter(document);
            let mut result = String::with_capacity(document.len() + text.len() + 1);
            if let Some(front_matter) = front_matter {
                result.push_str("---\n");
                result.push_str(front_matter);
                result.push_str("---\n");
            }
            result.push_str(text);
            if !text.ends_with('\n') {
                result.push('\n');
            }
            result.push_str(body);
            result
        }
        InsertPosition::AtHeading { heading } => insert_under_heading(document, text, heading),
    }
}

/// Insert directly below the heading line; append when the heading is
/// absent so the text is never silently dropped.
fn insert_under_heading(document: &str, text: &str, heading: &str) -> String {
    let target = heading.trim();
    let mut lines: Vec<&str> = document.lines().collect();

    let position = lines.iter().position(|line| {
        let trimmed = line.trim_start_matches('#');
        line.starts_with('#') && trimmed.trim() == target
    });

    match position {
        Some(index) => {
            lines.insert(index + 1, text);
            let mut result = lines.join("\n");
            if document.ends_with('\n') {
                result.push('\n');
            }
            result
        }
        None => insert_into(document, text, &InsertPosition::Bottom),
    }
}

#[async_trait]
impl ActionHandler for InsertTextHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::InsertText { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::InsertText {
            target_path,
            position,
            ..
        } = &action.kind
        else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        if target_path.trim().is_empty() {
            violations.push("target path is empty".to_string());
        }
        if let InsertPosition::AtHeading { heading } = position {
            if heading.trim().is_empty() {
                violations.push("heading is empty".to_string());
            }
        }
        violations
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::InsertText {
            target_path,
            content,
            position,
        } = &action.kind
        else {
            return Ok(());
        };

        let path = resolve_note_path(&self.engine, &self.vault, ctx, target_path).await?;
        if !self.vault.exists(&path) {
            return Err(EngineError::FileNotFound { path });
        }

        let text = self.engine.resolve_text(content, ctx).await;
        let document = self.vault.read(&path).await?;
        let updated = insert_into(&document, &text, position);
        self.vault.write(&path, &updated).await?;
        debug!(%path, "text inserted");
        Ok(())
    }
}

//! `copyToClipboard` handler — places resolved text on the clipboard.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FormAction};

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::{Clipboard, NoticeKind, Notifier};

/// Writes resolved text to the system clipboard.
pub struct CopyToClipboardHandler {
    clipboard: Arc<dyn Clipboard>,
    engine: Arc<TemplateEngine>,
    notifier: Arc<dyn Notifier>,
}

impl CopyToClipboardHandler {
    /// Create a handler over the given clipboard.
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        engine: Arc<TemplateEngine>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clipboard,
            engine,
            notifier,
        }
    }
}

#[async_trait]
impl ActionHandler for CopyToClipboardHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::CopyToClipboard { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::CopyToClipboard { content } = &action.kind else {
            return Vec::new();
        };
        if content.is_empty() {
            vec!["content is empty".to_string()]
        } else {
            Vec::new()
        }
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::CopyToClipboard { content } = &action.kind else {
            return Ok(());
        };

        let text = self.engine.resolve_text(content, ctx).await;
        self.clipboard
            .write_text(&text)
            .await
            .map_err(|e| EngineError::Clipboard {
                message: e.to_string(),
            })?;
        self.notifier.notify("Copied to clipboard", NoticeKind::Success);
        Ok(())
    }
}

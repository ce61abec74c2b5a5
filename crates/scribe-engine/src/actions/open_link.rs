//! `openLink` handler — opens an external link.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FormAction};
use tracing::debug;

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::EditorOps;

/// Opens an external link.
pub struct OpenLinkHandler {
    editor: Arc<dyn EditorOps>,
    engine: Arc<TemplateEngine>,
}

impl OpenLinkHandler {
    /// Create a handler over the given editor surface.
    pub fn new(editor: Arc<dyn EditorOps>, engine: Arc<TemplateEngine>) -> Self {
        Self { editor, engine }
    }
}

#[async_trait]
impl ActionHandler for OpenLinkHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::OpenLink { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::OpenLink { url } = &action.kind else {
            return Vec::new();
        };
        if url.trim().is_empty() {
            vec!["url is empty".to_string()]
        } else {
            Vec::new()
        }
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::OpenLink { url } = &action.kind else {
            return Ok(());
        };

        let resolved = self.engine.resolve_text(url, ctx).await;
        debug!(url = %resolved, "opening link");
        self.editor.open_link(&resolved).await?;
        Ok(())
    }
}

//! `openFile` handler — opens a vault document in the host editor.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FormAction};
use tracing::debug;

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::{EditorOps, VaultOps};

use super::util::resolve_note_path;

/// Opens a document in the editor.
pub struct OpenFileHandler {
    editor: Arc<dyn EditorOps>,
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
}

impl OpenFileHandler {
    /// Create a handler over the given editor and vault.
    pub fn new(
        editor: Arc<dyn EditorOps>,
        vault: Arc<dyn VaultOps>,
        engine: Arc<TemplateEngine>,
    ) -> Self {
        Self {
            editor,
            vault,
            engine,
        }
    }
}

#[async_trait]
impl ActionHandler for OpenFileHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::OpenFile { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::OpenFile { path } = &action.kind else {
            return Vec::new();
        };
        if path.trim().is_empty() {
            vec!["path is empty".to_string()]
        } else {
            Vec::new()
        }
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::OpenFile { path } = &action.kind else {
            return Ok(());
        };

        let resolved = resolve_note_path(&self.engine, &self.vault, ctx, path).await?;
        debug!(path = %resolved, "opening file");
        self.editor.open_file(&resolved).await?;
        Ok(())
    }
}

//! `executeCommand` handler — runs a registered command.
//!
//! Command failures are logged and the chain continues; a broken command
//! binding is not allowed to strand the rest of a workflow.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FormAction};
use tracing::{debug, warn};

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::CommandRunner;

/// Runs a registered command by id.
pub struct ExecuteCommandHandler {
    commands: Arc<dyn CommandRunner>,
    engine: Arc<TemplateEngine>,
}

impl ExecuteCommandHandler {
    /// Create a handler over the given command runner.
    pub fn new(commands: Arc<dyn CommandRunner>, engine: Arc<TemplateEngine>) -> Self {
        Self { commands, engine }
    }
}

#[async_trait]
impl ActionHandler for ExecuteCommandHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::ExecuteCommand { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::ExecuteCommand { command_id } = &action.kind else {
            return Vec::new();
        };
        if command_id.trim().is_empty() {
            vec!["command id is empty".to_string()]
        } else {
            Vec::new()
        }
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::ExecuteCommand { command_id } = &action.kind else {
            return Ok(());
        };

        let resolved = self.engine.resolve_text(command_id, ctx).await;
        debug!(command_id = %resolved, "executing command");
        if let Err(e) = self.commands.run(&resolved).await {
            warn!(command_id = %resolved, error = %e, "command failed, continuing chain");
        }
        Ok(())
    }
}

//! `aiCall` handler — calls the chat service and stores the reply as an
//! output variable.
//!
//! The prompt comes from the action payload or a vault template document,
//! is template-resolved against the run context, and is optionally preceded
//! by the settings-level system prompt. An unsuccessful response is a hard
//! failure that aborts the chain.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FieldValue, FormAction, PromptSource};
use scribe_llm::{ChatClient, ChatMessage, ChatRequest};
use scribe_settings::AiSettings;
use tracing::{debug, info};

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::{NoticeKind, Notifier, VaultOps};

use super::util::resolve_note_path;

/// Calls the AI chat service.
pub struct AiCallHandler {
    chat: Arc<dyn ChatClient>,
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
    notifier: Arc<dyn Notifier>,
    settings: AiSettings,
}

impl AiCallHandler {
    /// Create a handler over the chat client and its collaborators.
    pub fn new(
        chat: Arc<dyn ChatClient>,
        vault: Arc<dyn VaultOps>,
        engine: Arc<TemplateEngine>,
        notifier: Arc<dyn Notifier>,
        settings: AiSettings,
    ) -> Self {
        Self {
            chat,
            vault,
            engine,
            notifier,
            settings,
        }
    }

    /// Load and resolve the prompt text.
    async fn prepare_prompt(
        &self,
        prompt: &PromptSource,
        ctx: &ExecutionContext,
    ) -> Result<String, EngineError> {
        let raw = match prompt {
            PromptSource::Inline { prompt } => prompt.clone(),
            PromptSource::TemplateFile { path } => {
                let path = resolve_note_path(&self.engine, &self.vault, ctx, path).await?;
                if !self.vault.exists(&path) {
                    return Err(EngineError::FileNotFound { path });
                }
                self.vault.read(&path).await?
            }
        };
        Ok(self.engine.resolve_text(&raw, ctx).await)
    }

    /// Assemble the message list, prepending the system prompt when
    /// enabled.
    fn build_messages(&self, prompt: String) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if self.settings.enable_system_prompt && !self.settings.system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(self.settings.system_prompt.clone()));
        }
        messages.push(ChatMessage::user(prompt));
        messages
    }
}

/// A valid output variable name: identifier-shaped, no leading digit.
fn valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[async_trait]
impl ActionHandler for AiCallHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::AiCall { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::AiCall {
            prompt,
            output_variable,
            ..
        } = &action.kind
        else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        if output_variable.trim().is_empty() {
            violations.push("output variable name is empty".to_string());
        } else if !valid_variable_name(output_variable) {
            violations.push(format!(
                "output variable name '{output_variable}' is not a valid identifier"
            ));
        }
        match prompt {
            PromptSource::Inline { prompt } if prompt.trim().is_empty() => {
                violations.push("prompt is empty".to_string());
            }
            PromptSource::TemplateFile { path } if path.trim().is_empty() => {
                violations.push("prompt template path is empty".to_string());
            }
            _ => {}
        }
        violations
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::AiCall {
            prompt,
            output_variable,
            max_output_tokens,
        } = &action.kind
        else {
            return Ok(());
        };

        let prompt_text = self.prepare_prompt(prompt, ctx).await?;
        if prompt_text.trim().is_empty() {
            return Err(EngineError::Ai {
                message: "resolved prompt is empty".to_string(),
            });
        }

        let mut request = ChatRequest::new(self.build_messages(prompt_text));
        request.max_tokens = *max_output_tokens;

        debug!(%output_variable, "chat call starting");
        let response = self.chat.call(request).await;

        match (response.success, response.content) {
            (true, Some(content)) => {
                info!(%output_variable, chars = content.len(), "chat call succeeded");
                let _ = ctx
                    .output_variables
                    .insert(output_variable.clone(), FieldValue::Text(content));
                self.notifier.notify(
                    &format!("AI reply stored in {output_variable}"),
                    NoticeKind::Success,
                );
                Ok(())
            }
            _ => {
                let message = response
                    .error
                    .unwrap_or_else(|| "chat service returned no content".to_string());
                Err(EngineError::Ai { message })
            }
        }
    }
}

//! The submission entry point.
//!
//! A [`FormRunner`] takes captured values for a configuration, validates
//! them, builds the execution context, runs the chain, and handles
//! user-facing success/failure messaging. Each submission gets its own
//! context; nothing is shared between runs.

use std::collections::HashMap;
use std::sync::Arc;

use scribe_core::{FieldValue, FormConfig};
use scribe_settings::AiSettings;
use tracing::info;

use crate::actions::default_handler_set;
use crate::chain::{ActionChain, HandlerSet};
use crate::context::{ExecutionContext, default_id_values};
use crate::errors::EngineError;
use crate::traits::{Collaborators, NoticeKind, Notifier};
use crate::validate::validate_submission;

/// Runs form submissions against a fixed set of collaborators.
pub struct FormRunner {
    handlers: Arc<HandlerSet>,
    notifier: Arc<dyn Notifier>,
}

impl FormRunner {
    /// Create a runner with the default handler set.
    pub fn new(collaborators: &Collaborators, ai: AiSettings) -> Self {
        Self {
            handlers: Arc::new(default_handler_set(collaborators, ai)),
            notifier: collaborators.notifier.clone(),
        }
    }

    /// Create a runner over an explicit handler set (used by tests and by
    /// hosts that extend the action vocabulary).
    pub fn with_handlers(handlers: Arc<HandlerSet>, notifier: Arc<dyn Notifier>) -> Self {
        Self { handlers, notifier }
    }

    /// Run one submission.
    ///
    /// Unanswered fields fall back to their configured defaults, the
    /// submission is validated, and the chain executes. The returned
    /// context carries the output variables for the caller. The first hard
    /// failure is notified once and rethrown; effects already applied stay
    /// applied.
    pub async fn submit(
        &self,
        config: Arc<FormConfig>,
        mut id_values: HashMap<String, FieldValue>,
    ) -> Result<ExecutionContext, EngineError> {
        for field in &config.fields {
            if id_values.get(&field.id).is_none_or(FieldValue::is_empty) {
                if let Some(default) = &field.default_value {
                    let _ = id_values.insert(field.id.clone(), default.clone());
                }
            }
        }

        if let Err(e) = validate_submission(&config, &id_values) {
            self.notifier.notify(&e.to_string(), NoticeKind::Error);
            return Err(e);
        }

        let mut ctx = ExecutionContext::new(config.clone(), id_values);
        let chain = ActionChain::new(config.actions.clone(), self.handlers.clone());

        match chain.run(&mut ctx).await {
            Ok(()) => {
                info!(form_id = %config.id, "form run completed");
                if config.show_submit_message {
                    self.notifier.notify("Form submitted", NoticeKind::Success);
                }
                Ok(ctx)
            }
            Err(e) => {
                self.notifier.notify(&e.to_string(), NoticeKind::Error);
                Err(e)
            }
        }
    }

    /// Run a form without captured input, using field defaults only — the
    /// unattended path for auto-submitting forms.
    pub async fn submit_with_defaults(
        &self,
        config: Arc<FormConfig>,
    ) -> Result<ExecutionContext, EngineError> {
        let id_values = default_id_values(&config);
        self.submit(config, id_values).await
    }
}

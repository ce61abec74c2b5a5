//! The action execution chain.
//!
//! An [`ActionChain`] owns the ordered actions of one form and a
//! [`HandlerSet`] mapping each action kind to its handler. Execution is a
//! two-pass affair: a side-effect-free validation pass over every action,
//! then a sequential execution loop. The loop advances an index cursor and
//! awaits each handler to completion before moving on, so handlers observably
//! run in configured order and call depth stays flat regardless of chain
//! length.

use std::sync::Arc;

use scribe_core::FormAction;
use tracing::debug;

use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::filter::evaluate;

/// One action handler: accepts a kind, validates its payload, performs its
/// effect.
#[async_trait::async_trait]
pub trait ActionHandler: Send + Sync {
    /// Whether this handler owns the action's kind tag.
    fn accepts(&self, action: &FormAction) -> bool;

    /// Structural validation of the action's payload. Returns human-readable
    /// violations; empty means valid. Must not perform side effects.
    fn validate(&self, action: &FormAction) -> Vec<String>;

    /// Perform the action's effect. May read and write
    /// `ctx.output_variables`; must not touch the value snapshot.
    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError>;
}

/// The set of registered handlers; dispatch must be total over the action
/// kinds a configuration can contain.
#[derive(Default)]
pub struct HandlerSet {
    handlers: Vec<Arc<dyn ActionHandler>>,
}

impl HandlerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Arc<dyn ActionHandler>) {
        self.handlers.push(handler);
    }

    /// Find the handler owning an action's kind.
    pub fn find(&self, action: &FormAction) -> Option<Arc<dyn ActionHandler>> {
        self.handlers.iter().find(|h| h.accepts(action)).cloned()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// The ordered execution chain for one run.
pub struct ActionChain {
    actions: Vec<FormAction>,
    handlers: Arc<HandlerSet>,
}

impl ActionChain {
    /// Build a chain over the given actions and handler set.
    pub fn new(actions: Vec<FormAction>, handlers: Arc<HandlerSet>) -> Self {
        Self { actions, handlers }
    }

    /// Validate every action without side effects.
    ///
    /// Aggregates all violations — including actions no handler accepts —
    /// so the caller sees the full list at once. A failing validation
    /// guarantees zero handlers ran and zero external effects happened.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut violations = Vec::new();

        for (index, action) in self.actions.iter().enumerate() {
            let position = index + 1;
            match self.handlers.find(action) {
                Some(handler) => {
                    for violation in handler.validate(action) {
                        violations.push(format!(
                            "action {position} ({}): {violation}",
                            action.kind.tag()
                        ));
                    }
                }
                None => violations.push(format!(
                    "action {position}: no handler for type {}",
                    action.kind.tag()
                )),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation { violations })
        }
    }

    /// Validate, then execute every action in order.
    ///
    /// Each action's visibility condition is evaluated against the value
    /// snapshot captured before the run started; `output_variables` written
    /// mid-run never affect skip decisions. The first handler error aborts
    /// the remainder; effects already committed are not rolled back.
    pub async fn run(&self, ctx: &mut ExecutionContext) -> Result<(), EngineError> {
        self.validate()?;

        for action in &self.actions {
            let handler = self
                .handlers
                .find(action)
                .ok_or_else(|| EngineError::UnknownAction {
                    kind: action.kind.tag().to_string(),
                })?;

            if let Some(condition) = &action.condition {
                if !evaluate(condition, &ctx.id_values) {
                    debug!(action_id = %action.id, kind = action.kind.tag(), "action skipped by condition");
                    continue;
                }
            }

            debug!(action_id = %action.id, kind = action.kind.tag(), "running action");
            handler.run(action, ctx).await?;
        }

        Ok(())
    }
}

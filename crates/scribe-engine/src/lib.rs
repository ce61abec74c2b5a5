//! # scribe-engine
//!
//! The workflow core of Scribe: everything between a captured form
//! submission and its external effects.
//!
//! - **Filter evaluator** ([`filter`]): pure recursive evaluation of
//!   condition trees against a value map
//! - **Template expression engine** ([`template`]): `{{@Name}}` resolution
//!   with typed passthrough, file-content dereferencing, and built-in
//!   selection/clipboard tokens
//! - **Execution context** ([`context`]): the per-run record of captured
//!   values, the visibility snapshot, and output variables
//! - **Action chain** ([`chain`]): validate-all-then-execute loop over the
//!   ordered, polymorphic action handlers
//! - **Action handlers** ([`actions`]): one handler per action kind
//! - **Collaborator traits** ([`traits`]) and production [`providers`]
//! - **Form runner** ([`runner`]): the submission entry point
//!
//! External effects go through the collaborator traits exclusively, so the
//! whole engine runs against mocks in tests.

#![deny(unsafe_code)]

pub mod actions;
pub mod chain;
pub mod context;
pub mod errors;
pub mod filter;
pub mod providers;
pub mod runner;
pub mod template;
pub mod traits;
mod validate;

#[cfg(test)]
pub(crate) mod testutil;

pub use chain::{ActionChain, ActionHandler, HandlerSet};
pub use context::ExecutionContext;
pub use errors::EngineError;
pub use filter::evaluate;
pub use runner::FormRunner;
pub use template::TemplateEngine;

//! Engine error types.
//!
//! One enum covers every hard failure a run can produce. Soft failures
//! (template resolution, missing referenced files) never reach this type;
//! they degrade to inline marker text inside the template engine.

use std::io;

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Pre-run configuration validation failed. Nothing was executed.
    #[error("configuration invalid: {}", violations.join("; "))]
    Validation {
        /// Every violation found, in action order.
        violations: Vec<String>,
    },

    /// No handler accepts the action. Unreachable after a passing
    /// validation pass; treated as a hard failure if it ever surfaces.
    #[error("no handler for action type: {kind}")]
    UnknownAction {
        /// The action's type tag.
        kind: String,
    },

    /// A resolved file name is empty or contains forbidden characters.
    #[error("invalid file name: {name}")]
    InvalidFileName {
        /// The offending name after template resolution.
        name: String,
    },

    /// An action targeted a document that does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The resolved vault path.
        path: String,
    },

    /// A create-file action targeted an existing document.
    #[error("file already exists: {path}")]
    FileExists {
        /// The resolved vault path.
        path: String,
    },

    /// A path reference escaped the vault or could not be resolved.
    #[error("path not resolvable: {path}")]
    PathNotResolvable {
        /// The offending reference.
        path: String,
    },

    /// The AI call failed or returned an unsuccessful response.
    #[error("ai call failed: {message}")]
    Ai {
        /// Provider or transport failure description.
        message: String,
    },

    /// A registered command failed.
    #[error("command failed: {message}")]
    Command {
        /// Failure description, including the command id.
        message: String,
    },

    /// Clipboard access failed.
    #[error("clipboard error: {message}")]
    Clipboard {
        /// Failure description.
        message: String,
    },

    /// Generic I/O failure from a collaborator.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Front-matter could not be parsed or re-serialized.
    #[error("front matter error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

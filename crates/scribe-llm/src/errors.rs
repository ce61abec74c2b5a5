//! LLM error types.

use thiserror::Error;

/// Errors from constructing or configuring a chat client.
///
/// Call-time failures do not use this type; they are reported through
/// [`crate::ChatResponse::failure`] so the engine sees one uniform shape.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The model configuration is unusable.
    #[error("invalid model config: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// Building the HTTP client failed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

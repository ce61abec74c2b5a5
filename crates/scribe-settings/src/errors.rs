//! Settings error types.

use std::io;

use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading the settings file failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The settings file contains invalid JSON or an invalid shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

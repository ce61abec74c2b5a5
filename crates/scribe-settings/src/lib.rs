//! # scribe-settings
//!
//! Settings types and loading for Scribe.
//!
//! Loading flow (same shape for every consumer):
//! 1. Start with compiled [`ScribeSettings::default()`]
//! 2. If `~/.scribe/settings.json` exists, deep-merge user values over
//!    defaults
//! 3. Apply environment variable overrides (highest priority)

#![deny(unsafe_code)]

mod errors;
mod loader;
mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, deep_merge, load_settings, load_settings_from_path, settings_path,
};
pub use types::{AiSettings, CommandSettings, ModelSettings, ScribeSettings, VaultSettings};

//! Settings type definitions.
//!
//! All types use camelCase wire names and `#[serde(default)]` throughout so
//! a partial settings file deep-merges cleanly over the compiled defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root settings document (`~/.scribe/settings.json`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScribeSettings {
    /// Settings schema version.
    pub version: u32,
    /// Vault location settings.
    pub vault: VaultSettings,
    /// AI call settings.
    pub ai: AiSettings,
    /// Registered command settings.
    pub commands: CommandSettings,
}

/// Where the document vault lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultSettings {
    /// Root directory all vault paths resolve under.
    pub root: String,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self { root: ".".into() }
    }
}

/// Settings for the AI call action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    /// Configured chat models.
    pub models: Vec<ModelSettings>,
    /// Id of the model used when an action names none.
    pub default_model: Option<String>,
    /// Whether the system prompt is prepended to every call.
    pub enable_system_prompt: bool,
    /// The system prompt text.
    pub system_prompt: String,
    /// Vault folder holding reusable prompt templates.
    pub prompt_template_folder: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            default_model: None,
            enable_system_prompt: false,
            system_prompt: String::new(),
            prompt_template_folder: "templates/prompts".into(),
        }
    }
}

/// One configured chat model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Stable id referenced by `defaultModel`.
    pub id: String,
    /// Human-facing name.
    pub display_name: String,
    /// Chat-completions endpoint base URL.
    pub base_url: String,
    /// Provider-side model name sent in requests.
    pub model_name: String,
    /// API key sent as a bearer token. Prefer `apiKeyEnv` in shared files.
    pub api_key: String,
    /// Environment variable to read the API key from; takes precedence over
    /// `apiKey` when set and non-empty in the environment.
    pub api_key_env: String,
    /// Hard ceiling on reply tokens for this model.
    pub max_output_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            base_url: String::new(),
            model_name: String::new(),
            api_key: String::new(),
            api_key_env: String::new(),
            max_output_tokens: 4096,
        }
    }
}

impl ModelSettings {
    /// Resolve the API key, preferring the configured environment variable.
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key_env.is_empty() {
            if let Ok(key) = std::env::var(&self.api_key_env) {
                if !key.is_empty() {
                    return key;
                }
            }
        }
        self.api_key.clone()
    }
}

/// Registered commands runnable from an `executeCommand` action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandSettings {
    /// Command id → shell line.
    pub registered: HashMap<String, String>,
}

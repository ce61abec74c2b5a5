//! # scribe-cli
//!
//! Headless runner for Scribe form workflows: loads a form configuration,
//! wires the production collaborators over a local vault, and submits it.

#![deny(unsafe_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use scribe_core::{FieldValue, FormConfig};
use scribe_engine::actions::default_handler_set;
use scribe_engine::chain::ActionChain;
use scribe_engine::providers::{
    InMemoryClipboard, LocalVault, ShellCommandRunner, StaticEditor, SystemClock,
};
use scribe_engine::traits::{Collaborators, NoticeKind, Notifier};
use scribe_engine::{FormRunner, context};
use scribe_llm::{ChatClient, ChatRequest, ChatResponse, HttpChatClient, ModelConfig};
use scribe_settings::{ModelSettings, ScribeSettings};
use tracing_subscriber::EnvFilter;

/// Scribe form workflow runner.
#[derive(Parser, Debug)]
#[command(name = "scribe", about = "Run declarative document workflows against a vault")]
struct Cli {
    /// Path to the settings file (defaults to `~/.scribe/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Vault root directory (overrides settings).
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a form configuration.
    Run {
        /// Path to the form configuration JSON.
        form: PathBuf,
        /// Field values as `Label=value` (repeatable). Values parse as
        /// JSON where possible, otherwise as plain text.
        #[arg(long = "set", value_name = "LABEL=VALUE")]
        sets: Vec<String>,
    },
    /// Validate a form configuration without running it.
    Validate {
        /// Path to the form configuration JSON.
        form: PathBuf,
    },
    /// Print a summary of a form configuration.
    Show {
        /// Path to the form configuration JSON.
        form: PathBuf,
    },
}

/// Notifier that prints to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Error => eprintln!("error: {message}"),
            NoticeKind::Success | NoticeKind::Info => println!("{message}"),
        }
    }
}

/// Chat client used when no AI model is configured; every call fails with
/// a pointer to the settings file.
struct UnconfiguredChat;

#[async_trait::async_trait]
impl ChatClient for UnconfiguredChat {
    async fn call(&self, _request: ChatRequest) -> ChatResponse {
        ChatResponse::failure("no AI model configured (add one under ai.models in settings)")
    }
}

fn load_form(path: &Path) -> Result<FormConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form config: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse form config: {}", path.display()))
}

fn load_settings(cli: &Cli) -> Result<ScribeSettings> {
    let mut settings = match &cli.settings {
        Some(path) => scribe_settings::load_settings_from_path(path)
            .with_context(|| format!("failed to load settings: {}", path.display()))?,
        None => scribe_settings::load_settings().context("failed to load settings")?,
    };
    if let Some(vault) = &cli.vault {
        settings.vault.root = vault.display().to_string();
    }
    Ok(settings)
}

/// Pick the chat model: the configured default, else the first entry.
fn select_model(settings: &ScribeSettings) -> Option<&ModelSettings> {
    let models = &settings.ai.models;
    if let Some(default_id) = &settings.ai.default_model {
        if let Some(model) = models.iter().find(|m| &m.id == default_id) {
            return Some(model);
        }
    }
    models.first()
}

fn build_chat(settings: &ScribeSettings) -> Result<Arc<dyn ChatClient>> {
    match select_model(settings) {
        Some(model) => {
            let config = ModelConfig {
                base_url: model.base_url.clone(),
                model_name: model.model_name.clone(),
                api_key: model.resolve_api_key(),
                max_output_tokens: model.max_output_tokens,
            };
            Ok(Arc::new(HttpChatClient::new(config)?))
        }
        None => Ok(Arc::new(UnconfiguredChat)),
    }
}

fn build_collaborators(settings: &ScribeSettings) -> Result<Collaborators> {
    Ok(Collaborators {
        vault: Arc::new(LocalVault::new(settings.vault.root.clone())),
        clipboard: Arc::new(InMemoryClipboard::new()),
        editor: Arc::new(StaticEditor::default()),
        commands: Arc::new(ShellCommandRunner::new(
            settings.commands.registered.clone(),
            settings.vault.root.clone(),
        )),
        chat: build_chat(settings)?,
        macros: Arc::new(SystemClock),
        notifier: Arc::new(ConsoleNotifier),
    })
}

/// Parse `Label=value` pairs into an id-keyed value map.
fn parse_sets(config: &FormConfig, sets: &[String]) -> Result<HashMap<String, FieldValue>> {
    let mut id_values = HashMap::new();
    for entry in sets {
        let Some((label, raw)) = entry.split_once('=') else {
            bail!("invalid --set '{entry}', expected LABEL=VALUE");
        };
        let field = config
            .field_by_label(label)
            .or_else(|| config.field_by_id(label))
            .with_context(|| format!("no field labelled '{label}'"))?;
        let value = serde_json::from_str::<FieldValue>(raw)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string()));
        let _ = id_values.insert(field.id.clone(), value);
    }
    Ok(id_values)
}

async fn run_form(settings: &ScribeSettings, form_path: &Path, sets: &[String]) -> Result<()> {
    let config = Arc::new(load_form(form_path)?);
    let collaborators = build_collaborators(settings)?;
    let runner = FormRunner::new(&collaborators, settings.ai.clone());

    let ctx = if sets.is_empty() && config.auto_submit && context::all_fields_defaulted(&config) {
        runner.submit_with_defaults(config).await?
    } else {
        let id_values = parse_sets(&config, sets)?;
        runner.submit(config, id_values).await?
    };

    if !ctx.output_variables.is_empty() {
        let rendered = serde_json::to_string_pretty(&ctx.output_variables)?;
        println!("{rendered}");
    }
    Ok(())
}

fn validate_form(settings: &ScribeSettings, form_path: &Path) -> Result<()> {
    let config = load_form(form_path)?;
    let collaborators = build_collaborators(settings)?;
    let handlers = Arc::new(default_handler_set(&collaborators, settings.ai.clone()));
    let chain = ActionChain::new(config.actions.clone(), handlers);

    chain.validate()?;
    println!(
        "{}: {} fields, {} actions, ok",
        config.id,
        config.fields.len(),
        config.actions.len()
    );
    Ok(())
}

fn show_form(form_path: &Path) -> Result<()> {
    let config = load_form(form_path)?;
    println!("form {}", config.id);
    println!(
        "  auto submit: {}, submit message: {}",
        config.auto_submit, config.show_submit_message
    );
    println!("  fields:");
    for field in &config.fields {
        let required = if field.required { " (required)" } else { "" };
        println!("    {} [{}]{required}", field.label, field.id);
    }
    println!("  actions:");
    for (index, action) in config.actions.iter().enumerate() {
        let gated = if action.condition.is_some() {
            " (conditional)"
        } else {
            ""
        };
        println!("    {}. {}{gated}", index + 1, action.kind.tag());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    match &cli.command {
        Command::Run { form, sets } => run_form(&settings, form, sets).await,
        Command::Validate { form } => {
            validate_form(&settings, form)?;
            Ok(())
        }
        Command::Show { form } => show_form(form),
    }
}

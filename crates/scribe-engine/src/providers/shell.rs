//! Registered-command runner backed by `tokio::process`.
//!
//! Commands are a closed registry (id → shell line) supplied at
//! construction, not arbitrary strings from form configs; an unknown id is
//! an error, never an execution.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::traits::CommandRunner;

/// Runs registered commands as shell subprocesses.
pub struct ShellCommandRunner {
    registered: HashMap<String, String>,
    working_dir: PathBuf,
}

impl ShellCommandRunner {
    /// Create a runner over the registered command map.
    pub fn new(registered: HashMap<String, String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            registered,
            working_dir: working_dir.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, command_id: &str) -> Result<(), EngineError> {
        let Some(line) = self.registered.get(command_id) else {
            return Err(EngineError::Command {
                message: format!("no command registered under '{command_id}'"),
            });
        };

        debug!(command_id, %line, "spawning registered command");
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(line)
            .current_dir(&self.working_dir)
            .output()
            .await
            .map_err(|e| EngineError::Command {
                message: format!("failed to spawn '{command_id}': {e}"),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(command_id, code = output.status.code(), "command exited non-zero");
            Err(EngineError::Command {
                message: format!(
                    "'{command_id}' exited with {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            })
        }
    }
}

//! `cleanupContent` handler — strips formatting or clears a heading
//! section in an existing document.
//!
//! A heading that cannot be found is a warning, not a failure; the rest of
//! the chain proceeds with the document untouched.

use std::sync::Arc;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use scribe_core::{ActionKind, CleanupKind, FormAction, FormatStripOptions};
use tracing::{debug, warn};

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::VaultOps;

use super::util::resolve_note_path;

static IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~]+)~~").unwrap());
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"==([^=]+)==").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Cleans up content in a document.
pub struct CleanupContentHandler {
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
}

impl CleanupContentHandler {
    /// Create a handler over the given vault and template engine.
    pub fn new(vault: Arc<dyn VaultOps>, engine: Arc<TemplateEngine>) -> Self {
        Self { vault, engine }
    }
}

/// Strip the selected formatting marks. Images run before links so `![..]`
/// is not half-matched as a link; bold before italic for the same reason.
fn strip_formatting(content: &str, options: &FormatStripOptions) -> String {
    let mut text = content.to_string();
    if options.images {
        text = IMAGE.replace_all(&text, "").into_owned();
    }
    if options.links {
        text = LINK.replace_all(&text, "$1").into_owned();
    }
    if options.bold {
        text = BOLD_STARS.replace_all(&text, "$1").into_owned();
        text = BOLD_UNDERSCORES.replace_all(&text, "$1").into_owned();
    }
    if options.italic {
        text = ITALIC_STAR.replace_all(&text, "$1").into_owned();
        text = ITALIC_UNDERSCORE.replace_all(&text, "$1").into_owned();
    }
    if options.strikethrough {
        text = STRIKETHROUGH.replace_all(&text, "$1").into_owned();
    }
    if options.highlight {
        text = HIGHLIGHT.replace_all(&text, "$1").into_owned();
    }
    if options.inline_code {
        text = INLINE_CODE.replace_all(&text, "$1").into_owned();
    }
    text
}

/// Heading level (number of `#`) when the line is the target heading.
fn heading_level(line: &str, target: &str) -> Option<usize> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|c| *c == '#').count();
    let text = line[level..].trim();
    (level <= 6 && text == target).then_some(level)
}

/// Clear the body under the target heading, keeping the heading line.
///
/// Returns `None` when the heading is absent.
fn delete_heading_section(content: &str, heading: &str, to_same_level: bool) -> Option<String> {
    let target = heading.trim();
    let lines: Vec<&str> = content.lines().collect();

    let start = lines
        .iter()
        .position(|line| heading_level(line, target).is_some())?;
    let level = heading_level(lines[start], target).unwrap_or(6);

    let mut kept: Vec<&str> = lines[..=start].to_vec();
    let mut keeping = false;
    for line in &lines[start + 1..] {
        if !keeping && line.starts_with('#') {
            let next_level = line.chars().take_while(|c| *c == '#').count();
            if !to_same_level || next_level <= level {
                keeping = true;
            }
        }
        if keeping {
            kept.push(line);
        }
    }

    let mut result = kept.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    Some(result)
}

#[async_trait]
impl ActionHandler for CleanupContentHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::CleanupContent { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::CleanupContent {
            target_path,
            cleanup,
        } = &action.kind
        else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        if target_path.trim().is_empty() {
            violations.push("target path is empty".to_string());
        }
        if let CleanupKind::DeleteHeadingSection { heading, .. } = cleanup {
            if heading.trim().is_empty() {
                violations.push("heading is empty".to_string());
            }
        }
        violations
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::CleanupContent {
            target_path,
            cleanup,
        } = &action.kind
        else {
            return Ok(());
        };

        let path = resolve_note_path(&self.engine, &self.vault, ctx, target_path).await?;
        if !self.vault.exists(&path) {
            return Err(EngineError::FileNotFound { path });
        }
        let content = self.vault.read(&path).await?;

        let updated = match cleanup {
            CleanupKind::StripFormatting { options } => {
                Some(strip_formatting(&content, options))
            }
            CleanupKind::DeleteHeadingSection {
                heading,
                to_same_level,
            } => {
                let resolved_heading = self.engine.resolve_text(heading, ctx).await;
                let result = delete_heading_section(&content, &resolved_heading, *to_same_level);
                if result.is_none() {
                    warn!(%path, heading = %resolved_heading, "heading not found, document untouched");
                }
                result
            }
        };

        if let Some(updated) = updated {
            if updated != content {
                self.vault.write(&path, &updated).await?;
                debug!(%path, "content cleaned up");
            }
        }
        Ok(())
    }
}

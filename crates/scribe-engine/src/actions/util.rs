//! Helpers shared by file-targeting handlers.

use std::sync::Arc;

use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::template::extract::{clean_file_path, with_default_extension};
use crate::traits::VaultOps;

/// Characters never allowed in a resolved file name.
const FORBIDDEN_NAME_CHARS: &[char] = &['\\', ':', '*', '?', '"', '<', '>', '|'];

/// Reject empty names and names with characters the storage layer cannot
/// take. Applied to the final path segment, after template resolution.
pub(crate) fn validate_file_name(name: &str) -> Result<(), EngineError> {
    let segment = name.rsplit('/').next().unwrap_or(name).trim();
    if segment.is_empty() || segment.contains(FORBIDDEN_NAME_CHARS) {
        return Err(EngineError::InvalidFileName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Resolve a template-bearing path reference to a normalized vault path.
///
/// Resolution order: template expressions, wiki-link cleaning, default
/// `.md` extension, then vault confinement.
pub(crate) async fn resolve_note_path(
    engine: &TemplateEngine,
    vault: &Arc<dyn VaultOps>,
    ctx: &ExecutionContext,
    raw: &str,
) -> Result<String, EngineError> {
    let resolved = engine.resolve_text(raw, ctx).await;
    validate_file_name(&resolved)?;
    let path = with_default_extension(&clean_file_path(&resolved));
    vault
        .resolve_path(&path)
        .ok_or(EngineError::PathNotResolvable { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names_and_paths() {
        assert!(validate_file_name("note.md").is_ok());
        assert!(validate_file_name("folder/note").is_ok());
    }

    #[test]
    fn rejects_empty_and_blank_names() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name("folder/").is_err());
    }

    #[test]
    fn rejects_forbidden_characters() {
        for name in ["a:b", "a*b", "a?b", "a\"b", "a<b", "a>b", "a|b", "a\\b"] {
            assert!(validate_file_name(name).is_err(), "accepted {name}");
        }
    }
}

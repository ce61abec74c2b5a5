//! `updateProperties` handler — patches front-matter properties.
//!
//! Property names and values are template-resolved; a value that resolves
//! to a list (typed passthrough) becomes a YAML sequence. Existing
//! properties are overwritten, unknown ones appended, and the rest of the
//! document is left byte-for-byte untouched.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, FieldValue, FormAction};
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::debug;

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::template::extract::split_front_matter;
use crate::traits::VaultOps;

use super::util::resolve_note_path;

/// Patches front matter on a document.
pub struct UpdatePropertiesHandler {
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
}

impl UpdatePropertiesHandler {
    /// Create a handler over the given vault and template engine.
    pub fn new(vault: Arc<dyn VaultOps>, engine: Arc<TemplateEngine>) -> Self {
        Self { vault, engine }
    }
}

/// Map a resolved field value onto a YAML value.
fn to_yaml(value: FieldValue) -> YamlValue {
    match value {
        FieldValue::Text(s) => YamlValue::String(s),
        FieldValue::Number(n) => serde_yaml::to_value(n).unwrap_or(YamlValue::Null),
        FieldValue::Bool(b) => YamlValue::Bool(b),
        FieldValue::List(items) => {
            YamlValue::Sequence(items.into_iter().map(YamlValue::String).collect())
        }
        FieldValue::Null => YamlValue::Null,
    }
}

/// Apply the patched mapping back onto the document.
fn splice_front_matter(body: &str, mapping: &Mapping) -> Result<String, EngineError> {
    let yaml = serde_yaml::to_string(mapping)?;
    Ok(format!("---\n{yaml}---\n{body}"))
}

#[async_trait]
impl ActionHandler for UpdatePropertiesHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::UpdateProperties { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::UpdateProperties {
            target_path,
            updates,
            ..
        } = &action.kind
        else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        if target_path.trim().is_empty() {
            violations.push("target path is empty".to_string());
        }
        if updates.is_empty() {
            violations.push("no property updates configured".to_string());
        }
        for (index, update) in updates.iter().enumerate() {
            if update.name.trim().is_empty() {
                violations.push(format!("property {} has an empty name", index + 1));
            }
        }
        violations
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::UpdateProperties {
            target_path,
            create_if_missing,
            updates,
        } = &action.kind
        else {
            return Ok(());
        };

        let path = resolve_note_path(&self.engine, &self.vault, ctx, target_path).await?;
        if !self.vault.exists(&path) {
            if *create_if_missing {
                self.vault.write(&path, "").await?;
            } else {
                return Err(EngineError::FileNotFound { path });
            }
        }

        let document = self.vault.read(&path).await?;
        let (front_matter, body) = split_front_matter(&document);
        let mut mapping: Mapping = match front_matter {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
            _ => Mapping::new(),
        };

        for update in updates {
            let name = self.engine.resolve_text(&update.name, ctx).await;
            let value = self.engine.resolve(&update.value, ctx).await;
            let _ = mapping.insert(YamlValue::String(name), to_yaml(value));
        }

        let updated = splice_front_matter(body, &mapping)?;
        self.vault.write(&path, &updated).await?;
        debug!(%path, properties = updates.len(), "front matter updated");
        Ok(())
    }
}

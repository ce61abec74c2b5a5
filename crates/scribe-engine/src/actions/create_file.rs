//! `createFile` handler — creates a document from inline or template
//! content.
//!
//! The template path, folder, name and content are all template-resolved;
//! a missing template document is a hard failure (unlike references inside
//! expressions, which degrade softly).

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::{ActionKind, ConflictPolicy, ContentSource, FormAction};
use tracing::debug;

use crate::chain::ActionHandler;
use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::template::extract::{clean_file_path, with_default_extension};
use crate::traits::VaultOps;

use super::util::{resolve_note_path, validate_file_name};

/// Creates a document in the vault.
pub struct CreateFileHandler {
    vault: Arc<dyn VaultOps>,
    engine: Arc<TemplateEngine>,
}

impl CreateFileHandler {
    /// Create a handler over the given vault and template engine.
    pub fn new(vault: Arc<dyn VaultOps>, engine: Arc<TemplateEngine>) -> Self {
        Self { vault, engine }
    }

    async fn content_from_template(
        &self,
        template_file: &str,
        ctx: &ExecutionContext,
    ) -> Result<String, EngineError> {
        let path = resolve_note_path(&self.engine, &self.vault, ctx, template_file).await?;
        if !self.vault.exists(&path) {
            return Err(EngineError::FileNotFound { path });
        }
        let raw = self.vault.read(&path).await?;
        Ok(self.engine.resolve_text(&raw, ctx).await)
    }
}

#[async_trait]
impl ActionHandler for CreateFileHandler {
    fn accepts(&self, action: &FormAction) -> bool {
        matches!(action.kind, ActionKind::CreateFile { .. })
    }

    fn validate(&self, action: &FormAction) -> Vec<String> {
        let ActionKind::CreateFile {
            file_name,
            content_source,
            template_file,
            ..
        } = &action.kind
        else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        if file_name.trim().is_empty() {
            violations.push("file name is empty".to_string());
        }
        if *content_source == ContentSource::TemplateFile && template_file.trim().is_empty() {
            violations.push("template file is empty".to_string());
        }
        violations
    }

    async fn run(
        &self,
        action: &FormAction,
        ctx: &mut ExecutionContext,
    ) -> Result<(), EngineError> {
        let ActionKind::CreateFile {
            target_folder,
            file_name,
            content_source,
            content,
            template_file,
            on_conflict,
        } = &action.kind
        else {
            return Ok(());
        };

        let name = self.engine.resolve_text(file_name, ctx).await;
        validate_file_name(&name)?;
        let name = with_default_extension(&clean_file_path(&name));

        let folder = self.engine.resolve_text(target_folder, ctx).await;
        let joined = if folder.trim().is_empty() {
            name
        } else {
            format!("{}/{name}", folder.trim_matches('/'))
        };
        let path = self
            .vault
            .resolve_path(&joined)
            .ok_or(EngineError::PathNotResolvable { path: joined })?;

        let body = match content_source {
            ContentSource::Inline => self.engine.resolve_text(content, ctx).await,
            ContentSource::TemplateFile => self.content_from_template(template_file, ctx).await?,
        };

        if self.vault.exists(&path) && *on_conflict == ConflictPolicy::Error {
            return Err(EngineError::FileExists { path });
        }

        self.vault.write(&path, &body).await?;
        debug!(%path, bytes = body.len(), "document created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scribe_core::{FieldKind, FieldValue, FormField};

    use super::*;
    use crate::testutil::{MockVault, TestRig, ctx_with, empty_ctx};

    fn action(kind: ActionKind) -> FormAction {
        FormAction {
            id: "a1".into(),
            kind,
            condition: None,
        }
    }

    fn create(file_name: &str, content: &str) -> FormAction {
        action(ActionKind::CreateFile {
            target_folder: String::new(),
            file_name: file_name.into(),
            content_source: ContentSource::Inline,
            content: content.into(),
            template_file: String::new(),
            on_conflict: ConflictPolicy::Error,
        })
    }

    #[tokio::test]
    async fn creates_file_with_resolved_name_and_content() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = ctx_with(
            vec![FormField::new("f1", "Title", FieldKind::Text)],
            &[("Title", FieldValue::from("Weekly Review"))],
        );

        handler
            .run(&create("{{@Title}}", "# {{@Title}}\n"), &mut ctx)
            .await
            .unwrap();

        assert_eq!(
            rig.vault.contents("Weekly Review.md").as_deref(),
            Some("# Weekly Review\n")
        );
    }

    #[tokio::test]
    async fn joins_target_folder() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = empty_ctx();

        let mut act = create("note", "body");
        if let ActionKind::CreateFile { target_folder, .. } = &mut act.kind {
            *target_folder = "journal/".into();
        }
        handler.run(&act, &mut ctx).await.unwrap();
        assert!(rig.vault.exists("journal/note.md"));
    }

    #[tokio::test]
    async fn existing_file_errors_by_default() {
        let rig = TestRig::new(MockVault::new().with_file("note.md", "old"));
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = empty_ctx();

        let err = handler.run(&create("note", "new"), &mut ctx).await.unwrap_err();
        assert!(matches!(err, EngineError::FileExists { .. }));
        assert_eq!(rig.vault.contents("note.md").as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn overwrite_policy_replaces() {
        let rig = TestRig::new(MockVault::new().with_file("note.md", "old"));
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = empty_ctx();

        let mut act = create("note", "new");
        if let ActionKind::CreateFile { on_conflict, .. } = &mut act.kind {
            *on_conflict = ConflictPolicy::Overwrite;
        }
        handler.run(&act, &mut ctx).await.unwrap();
        assert_eq!(rig.vault.contents("note.md").as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn template_content_is_read_and_resolved() {
        let rig = TestRig::new(
            MockVault::new().with_file("templates/daily.md", "Hello {{@Name}}"),
        );
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = ctx_with(
            vec![FormField::new("f1", "Name", FieldKind::Text)],
            &[("Name", FieldValue::from("Ada"))],
        );

        let act = action(ActionKind::CreateFile {
            target_folder: String::new(),
            file_name: "out".into(),
            content_source: ContentSource::TemplateFile,
            content: String::new(),
            template_file: "templates/daily.md".into(),
            on_conflict: ConflictPolicy::Error,
        });
        handler.run(&act, &mut ctx).await.unwrap();
        assert_eq!(rig.vault.contents("out.md").as_deref(), Some("Hello Ada"));
    }

    #[tokio::test]
    async fn missing_template_is_hard_failure() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = empty_ctx();

        let act = action(ActionKind::CreateFile {
            target_folder: String::new(),
            file_name: "out".into(),
            content_source: ContentSource::TemplateFile,
            content: String::new(),
            template_file: "templates/ghost.md".into(),
            on_conflict: ConflictPolicy::Error,
        });
        let err = handler.run(&act, &mut ctx).await.unwrap_err();
        assert!(matches!(err, EngineError::FileNotFound { .. }));
        assert!(!rig.vault.exists("out.md"));
    }

    #[tokio::test]
    async fn resolved_name_with_forbidden_chars_fails() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        let mut ctx = ctx_with(
            vec![FormField::new("f1", "Title", FieldKind::Text)],
            &[("Title", FieldValue::from("a:b"))],
        );

        let err = handler
            .run(&create("{{@Title}}", ""), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidFileName { .. }));
    }

    #[test]
    fn validate_flags_empty_name_and_template() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());

        assert_eq!(handler.validate(&create("", "x")), vec!["file name is empty"]);

        let act = action(ActionKind::CreateFile {
            target_folder: String::new(),
            file_name: "ok".into(),
            content_source: ContentSource::TemplateFile,
            content: String::new(),
            template_file: " ".into(),
            on_conflict: ConflictPolicy::Error,
        });
        assert_eq!(handler.validate(&act), vec!["template file is empty"]);
    }

    #[test]
    fn accepts_only_create_file() {
        let rig = TestRig::new(MockVault::new());
        let handler = CreateFileHandler::new(rig.vault.clone(), rig.engine());
        assert!(handler.accepts(&create("x", "y")));
        assert!(!handler.accepts(&action(ActionKind::OpenLink {
            url: "https://example.com".into()
        })));
    }
}

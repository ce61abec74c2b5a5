//! Shared test doubles for handler tests.
//!
//! Hand-rolled mocks over the collaborator traits, plus context builders.
//! Compiled only for tests.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scribe_core::{FieldValue, FormConfig, FormField};
use scribe_llm::{ChatClient, ChatRequest, ChatResponse};

use crate::context::ExecutionContext;
use crate::errors::EngineError;
use crate::template::TemplateEngine;
use crate::traits::{
    Clipboard, Collaborators, CommandRunner, EditorOps, MacroProcessor, NoticeKind, Notifier,
    VaultOps,
};

/// In-memory vault with inspectable writes.
pub(crate) struct MockVault {
    files: Mutex<HashMap<String, String>>,
}

impl MockVault {
    pub(crate) fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn with_file(self, path: &str, content: &str) -> Self {
        let _ = self
            .files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        self
    }

    pub(crate) fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl VaultOps for MockVault {
    fn exists(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn read(&self, path: &str) -> Result<String, io::Error> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), io::Error> {
        let _ = self
            .files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn create_dir_all(&self, _path: &str) -> Result<(), io::Error> {
        Ok(())
    }

    fn resolve_path(&self, reference: &str) -> Option<String> {
        let normalized = reference.trim_start_matches("./");
        (!normalized.contains("..")).then(|| normalized.to_string())
    }
}

/// Clipboard holding one inspectable slot.
pub(crate) struct MockClipboard {
    pub(crate) text: Mutex<String>,
}

impl MockClipboard {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            text: Mutex::new(initial.to_string()),
        }
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn read_text(&self) -> Result<String, io::Error> {
        Ok(self.text.lock().unwrap().clone())
    }

    async fn write_text(&self, text: &str) -> Result<(), io::Error> {
        *self.text.lock().unwrap() = text.to_string();
        Ok(())
    }
}

/// Editor with a fixed selection, recording open requests.
pub(crate) struct MockEditor {
    pub(crate) selection: String,
    pub(crate) opened: Mutex<Vec<String>>,
}

impl MockEditor {
    pub(crate) fn new(selection: &str) -> Self {
        Self {
            selection: selection.to_string(),
            opened: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EditorOps for MockEditor {
    fn selection(&self) -> String {
        self.selection.clone()
    }

    async fn open_file(&self, path: &str) -> Result<(), io::Error> {
        self.opened.lock().unwrap().push(format!("file:{path}"));
        Ok(())
    }

    async fn open_link(&self, url: &str) -> Result<(), io::Error> {
        self.opened.lock().unwrap().push(format!("link:{url}"));
        Ok(())
    }
}

/// Command runner recording ids; fails for ids starting with `fail`.
pub(crate) struct MockCommands {
    pub(crate) executed: Mutex<Vec<String>>,
}

impl MockCommands {
    pub(crate) fn new() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CommandRunner for MockCommands {
    async fn run(&self, command_id: &str) -> Result<(), EngineError> {
        self.executed.lock().unwrap().push(command_id.to_string());
        if command_id.starts_with("fail") {
            return Err(EngineError::Command {
                message: format!("{command_id} exploded"),
            });
        }
        Ok(())
    }
}

/// Chat client returning a canned response.
pub(crate) struct MockChat {
    pub(crate) response: ChatResponse,
    pub(crate) requests: Mutex<Vec<ChatRequest>>,
}

impl MockChat {
    pub(crate) fn replying(content: &str) -> Self {
        Self {
            response: ChatResponse::success(content, None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: &str) -> Self {
        Self {
            response: ChatResponse::failure(error),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatClient for MockChat {
    async fn call(&self, request: ChatRequest) -> ChatResponse {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}

/// Macro processor that passes text through untouched.
pub(crate) struct IdentityMacros;

impl MacroProcessor for IdentityMacros {
    fn process(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Notifier recording every notice.
pub(crate) struct RecordingNotifier {
    pub(crate) notices: Mutex<Vec<(String, NoticeKind)>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), kind));
    }
}

/// Everything a handler test needs, with the concrete mocks still reachable
/// for assertions.
pub(crate) struct TestRig {
    pub(crate) vault: Arc<MockVault>,
    pub(crate) clipboard: Arc<MockClipboard>,
    pub(crate) editor: Arc<MockEditor>,
    pub(crate) commands: Arc<MockCommands>,
    pub(crate) chat: Arc<MockChat>,
    pub(crate) notifier: Arc<RecordingNotifier>,
}

impl TestRig {
    pub(crate) fn new(vault: MockVault) -> Self {
        Self {
            vault: Arc::new(vault),
            clipboard: Arc::new(MockClipboard::new("")),
            editor: Arc::new(MockEditor::new("")),
            commands: Arc::new(MockCommands::new()),
            chat: Arc::new(MockChat::replying("mock reply")),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    pub(crate) fn with_chat(mut self, chat: MockChat) -> Self {
        self.chat = Arc::new(chat);
        self
    }

    pub(crate) fn collaborators(&self) -> Collaborators {
        Collaborators {
            vault: self.vault.clone(),
            clipboard: self.clipboard.clone(),
            editor: self.editor.clone(),
            commands: self.commands.clone(),
            chat: self.chat.clone(),
            macros: Arc::new(IdentityMacros),
            notifier: self.notifier.clone(),
        }
    }

    pub(crate) fn engine(&self) -> Arc<TemplateEngine> {
        Arc::new(TemplateEngine::new(
            self.vault.clone(),
            self.clipboard.clone(),
            self.editor.clone(),
            Arc::new(IdentityMacros),
        ))
    }
}

/// A context over the given fields and label-keyed values.
pub(crate) fn ctx_with(
    fields: Vec<FormField>,
    values: &[(&str, FieldValue)],
) -> ExecutionContext {
    let mut config = FormConfig::new();
    config.actions.clear();
    let mut raw = HashMap::new();
    for (label, value) in values {
        let field = fields
            .iter()
            .find(|f| f.label == *label)
            .unwrap_or_else(|| panic!("no field labelled {label}"));
        let _ = raw.insert(field.id.clone(), value.clone());
    }
    config.fields = fields;
    ExecutionContext::new(Arc::new(config), raw)
}

/// A context with no fields.
pub(crate) fn empty_ctx() -> ExecutionContext {
    ctx_with(Vec::new(), &[])
}

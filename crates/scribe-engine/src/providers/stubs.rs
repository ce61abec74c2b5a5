//! Headless stand-ins for host surfaces.
//!
//! A headless process has no editor pane and no window system; these
//! providers keep the collaborator contracts honest without one.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{error, info};

use crate::traits::{Clipboard, EditorOps, NoticeKind, Notifier};

/// Clipboard held in process memory.
#[derive(Default)]
pub struct InMemoryClipboard {
    text: Mutex<String>,
}

impl InMemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current clipboard text.
    pub fn current(&self) -> String {
        self.text.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Clipboard for InMemoryClipboard {
    async fn read_text(&self) -> Result<String, io::Error> {
        Ok(self.current())
    }

    async fn write_text(&self, text: &str) -> Result<(), io::Error> {
        if let Ok(mut slot) = self.text.lock() {
            *slot = text.to_string();
        }
        Ok(())
    }
}

/// Editor surface with a fixed selection; open requests are logged.
pub struct StaticEditor {
    selection: String,
}

impl StaticEditor {
    /// Create an editor surface reporting the given selection.
    pub fn new(selection: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
        }
    }
}

impl Default for StaticEditor {
    fn default() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl EditorOps for StaticEditor {
    fn selection(&self) -> String {
        self.selection.clone()
    }

    async fn open_file(&self, path: &str) -> Result<(), io::Error> {
        info!(path, "open file requested");
        Ok(())
    }

    async fn open_link(&self, url: &str) -> Result<(), io::Error> {
        info!(url, "open link requested");
        Ok(())
    }
}

/// Notification sink that writes through `tracing`.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Error => error!(notice = message, "notice"),
            NoticeKind::Info | NoticeKind::Success => info!(notice = message, "notice"),
        }
    }
}

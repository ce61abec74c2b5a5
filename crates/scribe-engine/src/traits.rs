//! Collaborator traits — the engine's only boundary to the outside world.
//!
//! Handlers and the template engine receive these as `Arc<dyn Trait>` at
//! construction. Production implementations live in [`crate::providers`];
//! tests use hand-rolled mocks.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use scribe_llm::ChatClient;

use crate::errors::EngineError;

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral progress information.
    Info,
    /// A completed run or action.
    Success,
    /// A failed run.
    Error,
}

/// Document storage. All paths are vault-relative strings.
#[async_trait]
pub trait VaultOps: Send + Sync {
    /// Whether a document exists at the path.
    fn exists(&self, path: &str) -> bool;

    /// Read a document as text.
    async fn read(&self, path: &str) -> Result<String, io::Error>;

    /// Write a document, creating parent folders as needed.
    async fn write(&self, path: &str, content: &str) -> Result<(), io::Error>;

    /// Create a folder and all parents.
    async fn create_dir_all(&self, path: &str) -> Result<(), io::Error>;

    /// Resolve a path reference to a normalized vault-relative path, or
    /// `None` when the reference escapes the vault or is malformed.
    fn resolve_path(&self, reference: &str) -> Option<String>;
}

/// System clipboard access.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Read the clipboard as text.
    async fn read_text(&self) -> Result<String, io::Error>;

    /// Replace the clipboard with the given text.
    async fn write_text(&self, text: &str) -> Result<(), io::Error>;
}

/// The host editor surface: active selection and open requests.
#[async_trait]
pub trait EditorOps: Send + Sync {
    /// The active editor selection; empty when nothing is selected.
    fn selection(&self) -> String;

    /// Open a vault document in the editor.
    async fn open_file(&self, path: &str) -> Result<(), io::Error>;

    /// Open an external link.
    async fn open_link(&self, url: &str) -> Result<(), io::Error>;
}

/// Registered command execution.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command registered under the given id.
    async fn run(&self, command_id: &str) -> Result<(), EngineError>;
}

/// Opaque ambient token processor (date/time-style macros).
///
/// The template engine makes no assumptions about its grammar; the whole
/// resolved text is handed over once, after expression substitution.
pub trait MacroProcessor: Send + Sync {
    /// Expand ambient tokens in the text.
    fn process(&self, text: &str) -> String;
}

/// User-facing notification sink.
pub trait Notifier: Send + Sync {
    /// Surface a notice to the user.
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// The full bundle of collaborator implementations a run is wired with.
///
/// Handlers receive only the members they need at construction; this bundle
/// exists so callers assemble everything in one place.
#[derive(Clone)]
pub struct Collaborators {
    /// Document storage.
    pub vault: Arc<dyn VaultOps>,
    /// System clipboard.
    pub clipboard: Arc<dyn Clipboard>,
    /// Host editor surface.
    pub editor: Arc<dyn EditorOps>,
    /// Registered command execution.
    pub commands: Arc<dyn CommandRunner>,
    /// AI chat service.
    pub chat: Arc<dyn ChatClient>,
    /// Ambient macro processor.
    pub macros: Arc<dyn MacroProcessor>,
    /// Notification sink.
    pub notifier: Arc<dyn Notifier>,
}

//! Action handlers — one per action kind.
//!
//! Each handler is constructed with exactly the collaborators it needs.
//! [`default_handler_set`] wires the full set; registration covers every
//! [`scribe_core::ActionKind`] variant, which the chain's validation pass
//! relies on for total dispatch.

mod ai_call;
mod cleanup_content;
mod copy_to_clipboard;
mod create_file;
mod execute_command;
mod insert_text;
mod open_file;
mod open_link;
mod update_properties;
mod util;

use std::sync::Arc;

use scribe_settings::AiSettings;

pub use ai_call::AiCallHandler;
pub use cleanup_content::CleanupContentHandler;
pub use copy_to_clipboard::CopyToClipboardHandler;
pub use create_file::CreateFileHandler;
pub use execute_command::ExecuteCommandHandler;
pub use insert_text::InsertTextHandler;
pub use open_file::OpenFileHandler;
pub use open_link::OpenLinkHandler;
pub use update_properties::UpdatePropertiesHandler;

use crate::chain::HandlerSet;
use crate::template::TemplateEngine;
use crate::traits::Collaborators;

/// Wire one handler per action kind over the given collaborators.
pub fn default_handler_set(collaborators: &Collaborators, ai: AiSettings) -> HandlerSet {
    let engine = Arc::new(TemplateEngine::new(
        collaborators.vault.clone(),
        collaborators.clipboard.clone(),
        collaborators.editor.clone(),
        collaborators.macros.clone(),
    ));

    let mut set = HandlerSet::new();
    set.register(Arc::new(CreateFileHandler::new(
        collaborators.vault.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(InsertTextHandler::new(
        collaborators.vault.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(UpdatePropertiesHandler::new(
        collaborators.vault.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(AiCallHandler::new(
        collaborators.chat.clone(),
        collaborators.vault.clone(),
        engine.clone(),
        collaborators.notifier.clone(),
        ai,
    )));
    set.register(Arc::new(ExecuteCommandHandler::new(
        collaborators.commands.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(CleanupContentHandler::new(
        collaborators.vault.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(CopyToClipboardHandler::new(
        collaborators.clipboard.clone(),
        engine.clone(),
        collaborators.notifier.clone(),
    )));
    set.register(Arc::new(OpenFileHandler::new(
        collaborators.editor.clone(),
        collaborators.vault.clone(),
        engine.clone(),
    )));
    set.register(Arc::new(OpenLinkHandler::new(
        collaborators.editor.clone(),
        engine,
    )));
    set
}

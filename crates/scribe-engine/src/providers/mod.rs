//! Production implementations of the collaborator traits.
//!
//! Real providers back headless runs; the in-memory and logging providers
//! stand in for host surfaces (clipboard, editor) that a headless process
//! does not have.

mod macros;
mod shell;
mod stubs;
mod vault;

pub use macros::SystemClock;
pub use shell::ShellCommandRunner;
pub use stubs::{InMemoryClipboard, StaticEditor, TracingNotifier};
pub use vault::LocalVault;

//! Action definitions — one step of an automation.
//!
//! [`ActionKind`] is the closed tagged union over every automation step the
//! engine knows how to execute. Dispatch over it is total: adding a kind is
//! a compile-time exhaustiveness requirement on the handler set.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;

/// Where a create-file action takes its content from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentSource {
    /// Content authored inline in the action payload.
    #[default]
    Inline,
    /// Content read from a template document, itself template-resolved.
    TemplateFile,
}

/// What happens when a create-file action targets an existing path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictPolicy {
    /// Fail the run.
    #[default]
    Error,
    /// Replace the existing document.
    Overwrite,
}

/// Where inserted text lands inside the target document.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "position", rename_all = "camelCase")]
pub enum InsertPosition {
    /// After the front-matter block, before the body.
    Top,
    /// Appended at the end of the document.
    #[default]
    Bottom,
    /// Directly under the named heading.
    #[serde(rename_all = "camelCase")]
    AtHeading {
        /// Heading text to insert under (without `#` markers).
        heading: String,
    },
}

/// One front-matter property to set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    /// Property name; template-resolved.
    pub name: String,
    /// Property value; template-resolved, may expand to a list.
    pub value: String,
}

/// Where an AI call takes its prompt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum PromptSource {
    /// Prompt authored inline in the action payload.
    #[serde(rename_all = "camelCase")]
    Inline {
        /// The prompt text; template-resolved.
        prompt: String,
    },
    /// Prompt read from a template document in the vault.
    #[serde(rename_all = "camelCase")]
    TemplateFile {
        /// Vault path of the template; template-resolved before reading.
        path: String,
    },
}

/// Which markdown formatting marks a cleanup strips.
///
/// Every mark defaults to on; configs opt out per mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatStripOptions {
    /// Strip `**bold**` / `__bold__`.
    pub bold: bool,
    /// Strip `*italic*` / `_italic_`.
    pub italic: bool,
    /// Strip `~~strikethrough~~`.
    pub strikethrough: bool,
    /// Strip `==highlight==`.
    pub highlight: bool,
    /// Strip `` `inline code` ``.
    pub inline_code: bool,
    /// Replace `[text](url)` links with their text.
    pub links: bool,
    /// Remove `![alt](url)` images entirely.
    pub images: bool,
}

impl FormatStripOptions {
    /// Options with every mark enabled.
    pub fn all() -> Self {
        Self {
            bold: true,
            italic: true,
            strikethrough: true,
            highlight: true,
            inline_code: true,
            links: true,
            images: true,
        }
    }
}

impl Default for FormatStripOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// What a content-cleanup action does to the target document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cleanup", rename_all = "camelCase")]
pub enum CleanupKind {
    /// Strip markdown formatting marks from the whole document.
    #[serde(rename_all = "camelCase")]
    StripFormatting {
        /// Which marks to strip.
        #[serde(default)]
        options: FormatStripOptions,
    },
    /// Delete the body text under the named heading.
    #[serde(rename_all = "camelCase")]
    DeleteHeadingSection {
        /// Heading text whose section is cleared (without `#` markers).
        heading: String,
        /// When true, deletion runs until the next heading of the same or a
        /// higher level; when false, any heading stops it.
        #[serde(default)]
        to_same_level: bool,
    },
}

/// The closed set of automation steps, dispatched by the `type` tag.
///
/// Every text-bearing payload field is resolved through the template engine
/// at run time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionKind {
    /// Create a document from inline or template content.
    #[serde(rename_all = "camelCase")]
    CreateFile {
        /// Vault folder the document lands in; empty means the vault root.
        #[serde(default)]
        target_folder: String,
        /// Document name (with or without extension).
        file_name: String,
        /// Where the content comes from.
        #[serde(default)]
        content_source: ContentSource,
        /// Inline content, used when `content_source` is `Inline`.
        #[serde(default)]
        content: String,
        /// Template path, used when `content_source` is `TemplateFile`.
        #[serde(default)]
        template_file: String,
        /// Behavior when the target already exists.
        #[serde(default)]
        on_conflict: ConflictPolicy,
    },
    /// Insert resolved text into an existing document.
    #[serde(rename_all = "camelCase")]
    InsertText {
        /// Vault path of the target document.
        target_path: String,
        /// Text to insert.
        content: String,
        /// Where the text lands.
        #[serde(flatten)]
        position: InsertPosition,
    },
    /// Patch front-matter properties on a document.
    #[serde(rename_all = "camelCase")]
    UpdateProperties {
        /// Vault path of the target document.
        target_path: String,
        /// Create the document (empty body) if it does not exist.
        #[serde(default)]
        create_if_missing: bool,
        /// The properties to set.
        updates: Vec<PropertyUpdate>,
    },
    /// Call the AI chat service and store the reply in an output variable.
    #[serde(rename_all = "camelCase")]
    AiCall {
        /// Where the prompt comes from.
        #[serde(flatten)]
        prompt: PromptSource,
        /// Name the reply is stored under for later actions.
        output_variable: String,
        /// Cap on the reply length; clamped to the model's own ceiling.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_output_tokens: Option<u32>,
    },
    /// Run a registered command by id.
    #[serde(rename_all = "camelCase")]
    ExecuteCommand {
        /// Registered command id; template-resolved.
        command_id: String,
    },
    /// Clean up content in an existing document.
    #[serde(rename_all = "camelCase")]
    CleanupContent {
        /// Vault path of the target document.
        target_path: String,
        /// The cleanup to perform.
        #[serde(flatten)]
        cleanup: CleanupKind,
    },
    /// Write resolved text to the system clipboard.
    #[serde(rename_all = "camelCase")]
    CopyToClipboard {
        /// Text to place on the clipboard.
        content: String,
    },
    /// Open a document in the host editor.
    #[serde(rename_all = "camelCase")]
    OpenFile {
        /// Vault path of the document to open.
        path: String,
    },
    /// Open an external link.
    #[serde(rename_all = "camelCase")]
    OpenLink {
        /// The URL to open; template-resolved.
        url: String,
    },
}

impl ActionKind {
    /// The wire tag for this kind, as it appears in config JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CreateFile { .. } => "createFile",
            Self::InsertText { .. } => "insertText",
            Self::UpdateProperties { .. } => "updateProperties",
            Self::AiCall { .. } => "aiCall",
            Self::ExecuteCommand { .. } => "executeCommand",
            Self::CleanupContent { .. } => "cleanupContent",
            Self::CopyToClipboard { .. } => "copyToClipboard",
            Self::OpenFile { .. } => "openFile",
            Self::OpenLink { .. } => "openLink",
        }
    }
}

/// One step of an automation: a kind plus identity and an optional
/// visibility condition evaluated once per run against the value snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAction {
    /// Stable identity.
    pub id: String,
    /// Step payload and dispatch tag.
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Skip condition; evaluated against the pre-run snapshot, never
    /// re-evaluated mid-run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Filter>,
}

impl FormAction {
    /// Create an action with a generated id and no condition.
    pub fn new(kind: ActionKind) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            kind,
            condition: None,
        }
    }
}

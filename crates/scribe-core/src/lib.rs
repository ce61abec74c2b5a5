//! # scribe-core
//!
//! Foundation types for the Scribe workflow engine.
//!
//! This crate provides the shared vocabulary the other Scribe crates depend
//! on:
//!
//! - **Field values**: [`FieldValue`] — the JSON-compatible value union
//!   captured from form inputs and threaded through a run
//! - **Fields**: [`FormField`] with a closed [`FieldKind`] tag per input type
//! - **Actions**: [`FormAction`] with a closed [`ActionKind`] tagged union,
//!   one variant per automation step
//! - **Condition trees**: [`Filter`] — `Group`/`Condition` nodes evaluated
//!   against a value map
//! - **Form configuration**: [`FormConfig`] — the declarative document
//!   loaded wholesale before a run
//!
//! Everything here is pure data plus serde; no I/O.

#![deny(unsafe_code)]

mod action;
mod field;
mod filter;
mod form;
mod values;

pub use action::{
    ActionKind, CleanupKind, ConflictPolicy, ContentSource, FormAction, FormatStripOptions,
    InsertPosition, PromptSource, PropertyUpdate,
};
pub use field::{FieldKind, FormField};
pub use filter::{ConditionOperator, Filter, GroupOperator};
pub use form::FormConfig;
pub use values::FieldValue;

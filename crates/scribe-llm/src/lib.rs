//! # scribe-llm
//!
//! AI chat client for the Scribe workflow engine.
//!
//! Defines the [`ChatClient`] trait the engine's AI action calls through,
//! the message/request/response vocabulary, and [`HttpChatClient`] — a
//! `reqwest`-backed implementation for OpenAI-compatible chat-completions
//! endpoints.
//!
//! The client never panics and never surfaces transport errors as `Err`:
//! every failure mode lands in [`ChatResponse::failure`], mirroring how the
//! engine treats an unsuccessful AI call as a hard execution failure with a
//! human-readable message.

#![deny(unsafe_code)]

mod client;
mod errors;
mod types;

pub use client::{ChatClient, HttpChatClient};
pub use errors::LlmError;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, ModelConfig, TokenUsage};

//! The chat client trait and the OpenAI-compatible HTTP implementation.
//!
//! A single non-streaming POST per call. Replies and failures both come
//! back as a [`ChatResponse`]; the engine decides whether a failure aborts
//! the run.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::LlmError;
use crate::types::{ChatRequest, ChatResponse, ModelConfig, TokenUsage};

/// The boundary the engine's AI action calls through.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Perform one chat call. Failures are reported inside the response.
    async fn call(&self, request: ChatRequest) -> ChatResponse;
}

/// Chat client for OpenAI-compatible chat-completions endpoints.
pub struct HttpChatClient {
    http: reqwest::Client,
    model: ModelConfig,
}

impl HttpChatClient {
    /// Create a client for the given model.
    pub fn new(model: ModelConfig) -> Result<Self, LlmError> {
        if model.base_url.trim().is_empty() {
            return Err(LlmError::InvalidConfig {
                message: "empty base url".into(),
            });
        }
        if model.model_name.trim().is_empty() {
            return Err(LlmError::InvalidConfig {
                message: "empty model name".into(),
            });
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, model })
    }

    /// The full endpoint URL for this model.
    fn endpoint(&self) -> String {
        let base = self.model.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }

    /// Build the request body, clamping the token cap to the model ceiling.
    fn build_body(&self, request: &ChatRequest) -> Value {
        let max_tokens = request
            .max_tokens
            .unwrap_or(self.model.max_output_tokens)
            .min(self.model.max_output_tokens);
        let mut body = json!({
            "model": self.model.model_name,
            "messages": request.messages,
            "max_tokens": max_tokens,
            "stream": false,
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    /// Extract a reply from a 200 response body.
    fn parse_success(body: &Value) -> ChatResponse {
        let content = body["choices"][0]["message"]["content"].as_str();
        match content {
            Some(text) => {
                let count = |v: &Value| u32::try_from(v.as_u64().unwrap_or(0)).unwrap_or(u32::MAX);
                let usage = body.get("usage").map(|u| TokenUsage {
                    prompt_tokens: count(&u["prompt_tokens"]),
                    completion_tokens: count(&u["completion_tokens"]),
                    total_tokens: count(&u["total_tokens"]),
                });
                ChatResponse::success(text, usage)
            }
            None => ChatResponse::failure("response contained no message content"),
        }
    }

    /// Extract a failure message from a non-200 response.
    fn parse_error(status: u16, body: &str) -> ChatResponse {
        let provider_message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string));
        match provider_message {
            Some(message) => ChatResponse::failure(message),
            None => ChatResponse::failure(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn call(&self, request: ChatRequest) -> ChatResponse {
        let url = self.endpoint();
        let body = self.build_body(&request);
        debug!(model = %self.model.model_name, messages = request.messages.len(), "chat call");

        let mut builder = self.http.post(&url).json(&body);
        if !self.model.api_key.is_empty() {
            builder = builder.bearer_auth(&self.model.api_key);
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => return ChatResponse::failure(format!("request failed: {e}")),
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => return ChatResponse::failure(format!("reading response failed: {e}")),
        };

        if status == 200 {
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => Self::parse_success(&parsed),
                Err(e) => ChatResponse::failure(format!("invalid response json: {e}")),
            }
        } else {
            Self::parse_error(status, &text)
        }
    }
}

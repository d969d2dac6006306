//! Chat-completion client for the OpenAI API.
//!
//! The pipeline talks to the model through the [`ChatClient`] trait so tests
//! can substitute a mock; [`OpenAiClient`] is the live implementation over
//! `https://api.openai.com/v1/chat/completions`, in both blocking and
//! SSE-streaming form.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Errors from a chat-completion round-trip.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed API response: {0}")]
    Malformed(String),
}

/// A single role-tagged message in a chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Sends chat-completion requests to a language model.
///
/// Implemented by the live [`OpenAiClient`] and by test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a completion request and return the full response text.
    ///
    /// # Errors
    ///
    /// Returns an error if the round-trip fails (network, auth, malformed
    /// response).
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ApiError>;

    /// Send a streaming completion request.
    ///
    /// Response text is delivered incrementally on `chunks` in arrival
    /// order; the concatenation of all chunks is returned once the stream
    /// completes. The chunk sequence is finite and not restartable. Send
    /// failures (a dropped receiver) are ignored; accumulation continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the round-trip or the stream itself fails.
    async fn complete_streaming(
        &self,
        model: &str,
        messages: &[ChatMessage],
        chunks: UnboundedSender<String>,
    ) -> Result<String, ApiError>;
}

/// Live client for the OpenAI chat-completions endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn send(
        &self,
        model: &str,
        messages: &[ChatMessage],
        stream: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let body = ChatRequest {
            model,
            messages,
            stream,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

/// Top-level non-streaming response.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// One SSE frame of a streaming response.
#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ApiError> {
        let response = self.send(model, messages, false).await?;

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ApiError::Malformed("response contained no choices".into()))
    }

    async fn complete_streaming(
        &self,
        model: &str,
        messages: &[ChatMessage],
        chunks: UnboundedSender<String>,
    ) -> Result<String, ApiError> {
        let response = self.send(model, messages, true).await?;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut full = String::new();

        while let Some(bytes) = stream.next().await {
            let bytes = bytes?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            while let Some(pos) = buffer.find('\n') {
                let line: String = buffer.drain(..=pos).collect();
                let line = line.trim();

                let Some(data) = line.strip_prefix("data:") else {
                    continue;
                };
                let data = data.trim();

                if data == "[DONE]" {
                    return Ok(full);
                }

                // Frames that fail to parse (keep-alives, unknown events)
                // are skipped rather than failing the phase.
                let Ok(frame) = serde_json::from_str::<StreamChunk>(data) else {
                    continue;
                };
                if let Some(text) = frame
                    .choices
                    .first()
                    .and_then(|c| c.delta.content.as_deref())
                {
                    full.push_str(text);
                    let _ = chunks.send(text.to_string());
                }
            }
        }

        Ok(full)
    }
}

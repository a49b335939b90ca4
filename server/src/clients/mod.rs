//! Collaborator clients used by the startup pipeline
//!
//! The pipeline only talks to two external services: a chat-completion model
//! and a web-search provider. Both sit behind traits so a run can be driven by
//! the real HTTP clients in production and by canned stubs in tests.

pub mod chat;
pub mod search;

pub use chat::OpenAiChatClient;
pub use search::TavilySearchClient;

use async_trait::async_trait;
use thiserror::Error;

/// A single search hit, kept as raw JSON so it can be embedded verbatim in prompts
pub type SearchRecord = serde_json::Value;

/// Errors returned by collaborator clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, ...)
    #[error("{0}")]
    Http(String),

    /// The provider answered with a non-success status
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// The provider answered 2xx but the body was not what we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

/// Chat-completion collaborator
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a system prompt and a user message, returning the trimmed reply
    /// (empty when the provider returned no content)
    async fn complete(&self, system_prompt: &str, user_message: &str)
        -> Result<String, ClientError>;
}

/// Web-search collaborator
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Search for `query`, returning at most `max_results` records
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchRecord>, ClientError>;
}

/// Pull a human readable message out of a provider error body.
///
/// OpenAI-compatible and Tavily error bodies look like
/// `{"error": {"message": "..."}}`, `{"error": "..."}` or `{"detail": {"error": "..."}}`.
/// Anything else is returned as-is.
pub(crate) fn provider_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let candidates = [
            json.pointer("/error/message"),
            json.get("error"),
            json.pointer("/detail/error"),
            json.get("detail"),
            json.get("message"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(message) = candidate.as_str() {
                if !message.trim().is_empty() {
                    return message.trim().to_string();
                }
            }
        }
    }
    trimmed.to_string()
}

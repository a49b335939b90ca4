// OpenAI-compatible chat-completion client (MiniMax, OpenAI, ...)

use super::{provider_error_message, ChatClient, ClientError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat message sent to the provider
#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for `POST {base_url}/chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat client speaking the OpenAI `chat/completions` wire format
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    /// Create a new chat client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ClientError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        log::debug!(
            "Chat completion request: model={} prompt_len={}",
            self.model,
            system_prompt.len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: provider_error_message(&text),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral port and return its base URL
    async fn spawn_stub(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                // Echo the request shape back so the test can assert on it
                let system = body["messages"][0]["content"].as_str().unwrap_or("").to_string();
                let user = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
                let model = body["model"].as_str().unwrap_or("").to_string();
                let echo = format!("  {}|{}|{}\n", model, system, user);
                Json(json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": echo}},
                        {"message": {"role": "assistant", "content": "second"}}
                    ]
                }))
            }),
        );
        let base_url = spawn_stub(app).await;

        let client = OpenAiChatClient::new(base_url, "sk-test", "test-model");
        let reply = client.complete("be brief", "hello").await.unwrap();
        assert_eq!(reply, "test-model|be brief|hello");
    }

    #[tokio::test]
    async fn test_complete_missing_content_is_empty() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"role": "assistant"}}]})) }),
        );
        let base_url = spawn_stub(app).await;

        let client = OpenAiChatClient::new(base_url, "sk-test", "test-model");
        assert_eq!(client.complete("sys", "user").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_complete_no_choices_is_empty() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base_url = spawn_stub(app).await;

        let client = OpenAiChatClient::new(base_url, "sk-test", "test-model");
        assert_eq!(client.complete("sys", "user").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_complete_maps_api_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "invalid api key"}})),
                )
            }),
        );
        let base_url = spawn_stub(app).await;

        let client = OpenAiChatClient::new(base_url, "bad", "test-model");
        let err = client.complete("sys", "user").await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_malformed_body_is_decode_error() {
        let app = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let base_url = spawn_stub(app).await;

        let client = OpenAiChatClient::new(base_url, "sk-test", "test-model");
        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = OpenAiChatClient::new("https://api.example.com/v1/", "k", "m");
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(client.model(), "m");
    }
}

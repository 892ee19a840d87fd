//! Model gateway: the single point of entry for generative-model calls.
//!
//! No other module talks to the model endpoint directly. Callers depend on the
//! [`ModelGateway`] trait so tests can substitute a deterministic stub.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

use prompts::RESUME_PARSER_SYSTEM;

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.3;

/// Recoverable model-stage failures. The pipeline falls back on either one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model quota exceeded: {0}")]
    ModelQuotaExceeded(String),
}

/// Submits one instruction and returns the raw completion text.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn submit(&self, instruction: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// OpenAI-compatible chat-completions client (Groq by default).
///
/// One attempt per call; retry policy belongs to whoever wraps the pipeline.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the model gateway")?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.llm_api_url.clone(),
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.llm_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelGateway for ChatCompletionsClient {
    async fn submit(&self, instruction: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: RESUME_PARSER_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: instruction,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() { "timed out" } else { "request failed" };
                LlmError::ModelUnavailable(format!("{kind}: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Model endpoint returned {status}: {message}");
            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                LlmError::ModelQuotaExceeded(message)
            } else {
                LlmError::ModelUnavailable(format!("status {}: {message}", status.as_u16()))
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ModelUnavailable(format!("undecodable response: {e}")))?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Model call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::ModelUnavailable("empty completion".to_string()))
    }
}


#[cfg(test)]
mod tests {
    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    /// Serves `handler` on an ephemeral local port and returns its URL.
    async fn spawn_endpoint(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    fn client_for(url: String) -> ChatCompletionsClient {
        ChatCompletionsClient::new(url, "test-key", "test-model", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "test-model");
                assert_eq!(body["max_tokens"], 4000);
                assert_eq!(body["stream"], false);
                assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(
                    body["messages"][0]["content"],
                    super::prompts::RESUME_PARSER_SYSTEM
                );
                assert_eq!(body["messages"][1]["role"], "user");
                assert_eq!(body["messages"][1]["content"], "parse this");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"summary\": \"ok\"}"}}],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 5}
                }))
            }),
        );
        let client = client_for(spawn_endpoint(app).await);
        let text = client.submit("parse this").await.unwrap();
        assert_eq!(text, "{\"summary\": \"ok\"}");
    }

    #[tokio::test]
    async fn test_sends_bearer_credential() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: axum::http::HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"choices": [{"message": {"content": auth}}]}))
            }),
        );
        let client = client_for(spawn_endpoint(app).await);
        assert_eq!(client.submit("x").await.unwrap(), "Bearer test-key");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_quota_exceeded() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    AxumStatus::TOO_MANY_REQUESTS,
                    Json(json!({"error": {"message": "Rate limit reached"}})),
                )
            }),
        );
        let client = client_for(spawn_endpoint(app).await);
        assert_eq!(
            client.submit("x").await,
            Err(LlmError::ModelQuotaExceeded("Rate limit reached".to_string()))
        );
    }

    #[tokio::test]
    async fn test_auth_failure_maps_to_unavailable() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    AxumStatus::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Invalid API Key"}})),
                )
            }),
        );
        let client = client_for(spawn_endpoint(app).await);
        match client.submit("x").await {
            Err(LlmError::ModelUnavailable(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API Key"));
            }
            other => panic!("expected ModelUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_map_to_unavailable() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let client = client_for(spawn_endpoint(app).await);
        assert!(matches!(
            client.submit("x").await,
            Err(LlmError::ModelUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_unavailable() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(format!("http://{addr}/v1/chat/completions"));
        assert!(matches!(
            client.submit("x").await,
            Err(LlmError::ModelUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_as_unavailable() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"choices": []}))
            }),
        );
        let url = spawn_endpoint(app).await;
        let client =
            ChatCompletionsClient::new(url, "k", "m", Duration::from_millis(100)).unwrap();
        match client.submit("x").await {
            Err(LlmError::ModelUnavailable(msg)) => assert!(msg.starts_with("timed out")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}

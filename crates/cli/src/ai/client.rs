//! Chat-completion client for OpenAI-compatible APIs (Together, OpenAI)

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling settings shared by every provider
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Failure of a single completion request
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{provider} API error ({status}): {message}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("No text content in response")]
    EmptyResponse,
}

/// A hosted model that turns a system prompt and a user message into text
pub trait CompletionClient {
    fn complete(
        &self,
        system: &str,
        user_message: &str,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}

/// Error body returned by both OpenAI-style and Anthropic APIs
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Turn a non-success response into a [`CompletionError::Status`]
pub(crate) async fn status_error(
    provider: &'static str,
    response: reqwest::Response,
) -> CompletionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_err) => api_err.error.message,
        Err(_) => body,
    };
    CompletionError::Status {
        provider,
        status,
        message,
    }
}

/// Client for the `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    provider: &'static str,
    base_url: String,
    api_key: String,
    sampling: Sampling,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatClient {
    /// Create a new client for the given provider endpoint
    pub fn new(
        provider: &'static str,
        base_url: &str,
        api_key: String,
        sampling: Sampling,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            sampling,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl CompletionClient for ChatClient {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.sampling.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(user_message.to_string()),
                },
            ],
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
        };

        tracing::debug!(
            provider = self.provider,
            model = %self.sampling.model,
            endpoint = %self.endpoint(),
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(self.provider, response).await);
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

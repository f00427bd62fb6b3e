//! Claude API client for the Anthropic Messages API

use serde::{Deserialize, Serialize};

use super::client::{CompletionClient, CompletionError, Sampling, status_error};

const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Claude Messages API
#[derive(Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    sampling: Sampling,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Individual content block within a response
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
    temperature: f32,
}

/// Response from the Messages API
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
}

impl ClaudeClient {
    /// Create a new client with the given API key
    pub fn new(base_url: &str, api_key: String, sampling: Sampling) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            sampling,
        }
    }

    /// Extract text content from an API response
    pub fn extract_text(response: ApiResponse) -> Result<String, CompletionError> {
        response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(CompletionError::EmptyResponse)
    }
}

impl CompletionClient for ClaudeClient {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, CompletionError> {
        let request = ApiRequest {
            model: &self.sampling.model,
            max_tokens: self.sampling.max_tokens,
            system,
            messages: vec![Message {
                role: "user".to_string(),
                content: user_message.to_string(),
            }],
            temperature: self.sampling.temperature,
        };

        let url = format!("{}/messages", self.base_url);
        tracing::debug!(model = %self.sampling.model, endpoint = %url, "Sending Claude request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error("Claude", response).await);
        }

        let body = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        tracing::debug!(stop_reason = ?body.stop_reason, "Claude response received");
        Self::extract_text(body)
    }
}

//! Chat-completion client

use super::types::{ChatRequest, ChatResponse};
use crate::network::{accept_json, HttpClient, HttpRequest};
use async_trait::async_trait;
use tracing::debug;

/// Why a completion call produced no text
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("model returned no choices")]
    EmptyResponse,
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A hosted model that turns role-tagged messages into text
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Run one completion and return the first choice's text
    async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

/// Groq client over the OpenAI-compatible endpoint
pub struct GroqClient {
    client: HttpClient,
    base_url: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(client: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatCompletion for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let body = serde_json::to_value(request)?;
        let http_request = HttpRequest::post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", accept_json())
            .json(body);

        let response = self.client.execute(http_request).await?;
        if !response.is_success() {
            return Err(ChatError::Http {
                status: response.status,
                body: response.text,
            });
        }

        let parsed: ChatResponse = response.json()?;
        if let Some(ref usage) = parsed.usage {
            debug!(
                "Completion used {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .first_content()
            .map(str::to_string)
            .ok_or(ChatError::EmptyResponse)
    }
}

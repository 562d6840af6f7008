//! OpenAI-compatible chat-completion client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::CompletionError;
use crate::prompt::{schedule_request, SCHEDULING_INSTRUCTIONS};
use crate::retry::{with_retry, RetryConfig};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Request parameters for the completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    options: CompletionOptions,
    retry: RetryConfig,
}

impl CompletionClient {
    pub fn new(api_key: &str, options: CompletionOptions) -> Result<Self, CompletionError> {
        Self::new_with_base_url(api_key, OPENAI_API_BASE, options)
    }

    /// Client against a custom base URL (self-hosted gateways, tests).
    pub fn new_with_base_url(
        api_key: &str,
        base_url: &str,
        options: CompletionOptions,
    ) -> Result<Self, CompletionError> {
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let client = reqwest::Client::builder().timeout(options.timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            options,
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Ask the model for a scheduling plan for one task.
    ///
    /// Returns the raw completion text, unparsed.
    #[instrument(skip(self), level = "info")]
    pub async fn request_schedule(&self, task: &str) -> Result<String, CompletionError> {
        let user_message = schedule_request(task);
        self.complete(SCHEDULING_INSTRUCTIONS, &user_message).await
    }

    /// Send one system + user exchange and return the first choice.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.options.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = with_retry(&self.retry, || {
            self.client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
        })
        .await?;

        let parsed: ChatResponse = self.handle_response(response).await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        tracing::debug!("Received completion of {} bytes", content.len());
        Ok(content)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CompletionError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CompletionError::InvalidResponse(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CompletionError::Unauthorized)
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CompletionError::RateLimited(retry_after))
        } else {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Completion request failed with {}: {}", status, message);
            Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

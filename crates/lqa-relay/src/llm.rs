//! Upstream chat-completion client
//!
//! Talks to the x.ai chat-completions API (OpenAI-compatible wire format)
//! with a single user message per call.
//!
//! Author: hephaex@gmail.com

use async_trait::async_trait;
use lqa_core::{LlmClient, LqaError, Result, UpstreamConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// x.ai API client
pub struct XaiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// Every level is optional: a reply without content is not an error.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Option<String> {
        self.choices?.into_iter().next()?.message?.content
    }
}

/// Render an error with every `source()` below it.
///
/// reqwest's own message stops at "error sending request"; the reason
/// (refused connection, DNS, TLS, timeout) only appears further down.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl XaiClient {
    /// Create a new x.ai client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LqaError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            max_tokens,
        })
    }

    /// Create from config.
    ///
    /// A missing key is sent as an empty bearer token so the upstream
    /// rejects the call instead of the process refusing to start.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.base_url.clone(),
            config.model.clone(),
            config.max_tokens,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for XaiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LqaError::Upstream(format!("Request failed: {}", error_chain(&e))))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LqaError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| {
                LqaError::Upstream(format!("Failed to parse response: {}", error_chain(&e)))
            })?;

        Ok(result.into_content())
    }
}

// ============================================================================
// Tests
// ============================================================================

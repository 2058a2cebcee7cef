//! LQA Core - Payloads, traits, and shared types
//!
//! This crate defines the abstractions shared by the relay, the HTTP server
//! and the command-line client:
//! - Submission request/response payloads
//! - Common error types
//! - The `QueryBackend` trait implemented by the live relay and the mock
//! - The `LlmClient` trait for upstream chat-completion services
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, LoggingConfig, RelayConfig, RelayMode, ServerConfig, UpstreamConfig,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for LQA operations
#[derive(Error, Debug)]
pub enum LqaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LqaError {
    /// Whether the error came from the upstream service rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::UpstreamStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, LqaError>;

// ============================================================================
// Payloads
// ============================================================================

/// A legal query together with the name of the document picked by the user.
///
/// Only the file name travels; the document itself is never uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Free-text legal question
    #[schema(example = "Can I break a lease early?")]
    pub query: String,

    /// Name of the chosen document
    #[schema(example = "lease.pdf")]
    pub file_name: String,
}

impl SubmitRequest {
    pub fn new(query: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            file_name: file_name.into(),
        }
    }

    /// Reject blank fields before any backend work happens
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(LqaError::Validation("query cannot be empty".to_string()));
        }
        if self.file_name.trim().is_empty() {
            return Err(LqaError::Validation("fileName cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Successful answer to a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Reply text for the query
    #[schema(example = "Yes, under certain conditions...")]
    pub query_response: String,

    /// Short summary labelled with the document name
    #[schema(example = "Summary of lease.pdf: Yes, under certain conditions.....")]
    pub summary: String,
}

// ============================================================================
// Traits
// ============================================================================

/// A backend able to answer a submission.
///
/// The live relay and the mock share this contract so the HTTP layer never
/// knows which one it is talking to.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Answer one submission
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Trait for LLM clients
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a reply for a single user prompt.
    ///
    /// `Ok(None)` means the service answered but carried no reply text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;
}

// ============================================================================
// Tests
// ============================================================================

//! Live relay backend
//!
//! Forwards each submission to an upstream LLM and shapes the reply into
//! a `SubmitResponse`.

use async_trait::async_trait;
use lqa_core::{LlmClient, QueryBackend, Result, SubmitRequest, SubmitResponse};
use std::sync::Arc;

/// Reply used when the upstream answers without any content
pub const NO_RESPONSE: &str = "No response";

/// Number of reply characters kept in the summary
pub const SUMMARY_CHARS: usize = 200;

/// Build the single user prompt sent upstream
pub fn build_prompt(request: &SubmitRequest) -> String {
    format!(
        "Legal query: {}\nDocument uploaded: {}",
        request.query, request.file_name
    )
}

/// Label the first `SUMMARY_CHARS` characters of the reply with the file name.
///
/// The ellipsis is always appended, even when nothing was cut.
pub fn build_summary(file_name: &str, reply: &str) -> String {
    let head: String = reply.chars().take(SUMMARY_CHARS).collect();
    format!("Summary of {file_name}: {head}...")
}

/// Backend that relays submissions to an upstream LLM
pub struct RelayBackend {
    llm: Arc<dyn LlmClient>,
}

impl RelayBackend {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QueryBackend for RelayBackend {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        request.validate()?;

        let prompt = build_prompt(request);
        let reply = self
            .llm
            .generate(&prompt)
            .await?
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!(file_name = %request.file_name, "upstream reply had no content");
                NO_RESPONSE.to_string()
            });

        Ok(SubmitResponse {
            summary: build_summary(&request.file_name, &reply),
            query_response: reply,
        })
    }

    fn name(&self) -> &str {
        "live"
    }
}

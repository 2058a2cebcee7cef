//! Mock backend for development without upstream cost

use async_trait::async_trait;
use lqa_core::{QueryBackend, Result, SubmitRequest, SubmitResponse};
use std::time::Duration;

/// Backend that waits a fixed delay and returns canned text
pub struct MockBackend {
    delay: Duration,
}

impl MockBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl QueryBackend for MockBackend {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        request.validate()?;

        // Simulated processing time
        tokio::time::sleep(self.delay).await;

        Ok(SubmitResponse {
            query_response: format!(
                "Analysis of query: \"{}\". This is a mock legal response based on the provided input.",
                request.query
            ),
            summary: format!(
                "Summary of {}: This is a mock summary of the uploaded document.",
                request.file_name
            ),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

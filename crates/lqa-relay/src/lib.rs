//! LQA Relay - backends answering legal query submissions
//!
//! Two interchangeable `QueryBackend` implementations:
//! - [`RelayBackend`]: forwards the query to an upstream chat-completion API
//! - [`MockBackend`]: waits a fixed delay and returns canned text
//!
//! [`create_backend`] picks one from configuration.

pub mod llm;
pub mod mock;
pub mod relay;

pub use llm::XaiClient;
pub use mock::MockBackend;
pub use relay::{build_prompt, build_summary, RelayBackend, NO_RESPONSE, SUMMARY_CHARS};

use lqa_core::{AppConfig, QueryBackend, RelayMode, Result};
use std::sync::Arc;
use std::time::Duration;

/// Create the backend selected by config
pub fn create_backend(config: &AppConfig) -> Result<Arc<dyn QueryBackend>> {
    match config.relay.mode {
        RelayMode::Live => {
            if config.upstream.api_key.is_none() {
                tracing::warn!("XAI_API_KEY is not set; upstream calls will be rejected");
            }
            let client = XaiClient::from_config(&config.upstream)?;
            tracing::info!(
                model = client.model(),
                base_url = %config.upstream.base_url,
                "Using live relay backend"
            );
            Ok(Arc::new(RelayBackend::new(Arc::new(client))))
        }
        RelayMode::Mock => {
            let delay = Duration::from_millis(config.relay.mock_delay_ms);
            tracing::info!(delay_ms = config.relay.mock_delay_ms, "Using mock backend");
            Ok(Arc::new(MockBackend::new(delay)))
        }
    }
}

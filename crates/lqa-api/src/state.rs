//! Application state management
//!
//! Author: hephaex@gmail.com

use lqa_core::{AppConfig, QueryBackend, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Backend answering submissions (live relay or mock)
    pub backend: Arc<dyn QueryBackend>,
    /// Server start time
    pub start_time: Instant,
    /// Submission counter
    pub request_count: AtomicU64,
    /// Ready status
    pub is_ready: AtomicBool,
}

impl AppState {
    /// Create new application state with an explicit backend
    pub fn new(config: AppConfig, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            config,
            backend,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            is_ready: AtomicBool::new(true),
        }
    }

    /// Create state with the backend selected by config
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let backend = lqa_relay::create_backend(&config)?;
        Ok(Self::new(config, backend))
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if service is ready
    pub fn is_ready(&self) -> bool {
        self.is_ready.load(Ordering::SeqCst)
    }

    /// Set ready status
    pub fn set_ready(&self, ready: bool) {
        self.is_ready.store(ready, Ordering::SeqCst);
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

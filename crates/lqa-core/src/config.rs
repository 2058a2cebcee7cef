//! LQA Configuration Management
//!
//! Handles configuration from environment variables and TOML files with
//! sensible defaults for development.
//!
//! Author: hephaex@gmail.com

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Backend selection
    pub relay: RelayConfig,

    /// Upstream chat-completion service
    pub upstream: UpstreamConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_overrides(lookup)?;
        config.finish()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;
        config.finish()
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())?;
        self.finish()
    }

    /// Normalize values and reject combinations the server cannot honour
    fn finish(mut self) -> Result<Self, ConfigError> {
        self.upstream.base_url = self.upstream.base_url.trim_end_matches('/').to_string();

        // The request timeout answers with an empty 408, so the backend must
        // always finish (or fail with a JSON error) before it fires.
        let request_timeout_ms = self.server.request_timeout_secs.saturating_mul(1000);
        match self.relay.mode {
            RelayMode::Live if self.upstream.timeout_secs >= self.server.request_timeout_secs => {
                return Err(ConfigError::InvalidValue {
                    key: "LLM_TIMEOUT_SECS".to_string(),
                    value: format!(
                        "{} (must be below REQUEST_TIMEOUT_SECS={})",
                        self.upstream.timeout_secs, self.server.request_timeout_secs
                    ),
                });
            }
            RelayMode::Mock if self.relay.mock_delay_ms >= request_timeout_ms => {
                return Err(ConfigError::InvalidValue {
                    key: "MOCK_DELAY_MS".to_string(),
                    value: format!(
                        "{} (must be below REQUEST_TIMEOUT_SECS={})",
                        self.relay.mock_delay_ms, self.server.request_timeout_secs
                    ),
                });
            }
            _ => {}
        }

        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.server.port = parse_value("API_PORT", port)?;
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs = parse_value("REQUEST_TIMEOUT_SECS", secs)?;
        }

        // CORS origins from environment variable (comma-separated)
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Relay
        if let Some(mode) = lookup("RELAY_MODE") {
            self.relay.mode = mode.parse()?;
        }
        if let Some(delay) = lookup("MOCK_DELAY_MS") {
            self.relay.mock_delay_ms = parse_value("MOCK_DELAY_MS", delay)?;
        }

        // Upstream
        if let Some(key) = lookup("XAI_API_KEY") {
            self.upstream.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(url) = lookup("XAI_BASE_URL") {
            self.upstream.base_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.upstream.model = model;
        }
        if let Some(tokens) = lookup("LLM_MAX_TOKENS") {
            self.upstream.max_tokens = parse_value("LLM_MAX_TOKENS", tokens)?;
        }
        if let Some(secs) = lookup("LLM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = parse_value("LLM_TIMEOUT_SECS", secs)?;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Allowed origins for CORS (any origin when empty)
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 60,
            cors_origins: vec![],
        }
    }
}

/// Which backend answers submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Live relay or canned mock
    pub mode: RelayMode,

    /// Simulated processing delay for the mock, in milliseconds
    pub mock_delay_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mode: RelayMode::Live,
            mock_delay_ms: 2000,
        }
    }
}

/// Supported backend modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayMode {
    Live,
    Mock,
}

impl std::fmt::Display for RelayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for RelayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::InvalidValue {
                key: "RELAY_MODE".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Upstream chat-completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// x.ai API key
    pub api_key: Option<String>,

    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model name to use
    pub model: String,

    /// Maximum tokens for completion
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.x.ai/v1".to_string(),
            model: "grok-3-mini".to_string(),
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

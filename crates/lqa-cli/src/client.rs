//! Relay client used by `lqa submit`
//!
//! Mirrors the web form: both fields are required, only the document's
//! name is sent, and a failed submission is logged and swallowed. Results
//! are handed to an `on_result` callback so rendering stays separate.

use anyhow::Context;
use lqa_core::{SubmitRequest, SubmitResponse};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Document types the picker accepts
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Reasons a submission is refused before anything is sent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("a legal query is required")]
    MissingQuery,

    #[error("a document is required")]
    MissingDocument,

    #[error("unsupported document type: {0} (accepted: .pdf, .doc, .docx, .txt)")]
    UnsupportedDocument(String),
}

/// Take the file name of a picked document without reading it
pub fn document_name(path: &Path) -> Result<String, SubmissionError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(SubmissionError::MissingDocument)?;

    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);

    if !accepted {
        return Err(SubmissionError::UnsupportedDocument(name.to_string()));
    }

    Ok(name.to_string())
}

/// Build a submission from raw inputs
pub fn build_submission(query: &str, document: &Path) -> Result<SubmitRequest, SubmissionError> {
    if query.trim().is_empty() {
        return Err(SubmissionError::MissingQuery);
    }
    let file_name = document_name(document)?;
    Ok(SubmitRequest::new(query, file_name))
}

/// HTTP client for the relay endpoint
pub struct SubmitClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(server: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: format!("{}/api/submit", server.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one submission; `on_result` runs only on success.
    ///
    /// Returns whether a result was delivered. Failures are logged only.
    pub async fn submit<F>(&self, request: &SubmitRequest, on_result: F) -> bool
    where
        F: FnOnce(SubmitResponse),
    {
        tracing::info!(query = %request.query, "Submitting query");
        tracing::info!(file_name = %request.file_name, "Submitting file");

        match self.post(request).await {
            Ok(response) => {
                tracing::debug!(?response, "API response");
                on_result(response);
                true
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Submission error");
                false
            }
        }
    }

    async fn post(&self, request: &SubmitRequest) -> anyhow::Result<SubmitResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("request to relay failed")?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("relay returned a non-JSON body")?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            anyhow::bail!("relay answered {status}: {message}");
        }

        serde_json::from_value(body).context("unexpected response shape")
    }
}

//! API Integration Tests
//!
//! Live-mode tests run against a wiremock server standing in for the
//! upstream chat-completion API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use lqa_api::{create_router, create_router_for_testing, state::AppState};
use lqa_core::{AppConfig, RelayMode};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tower::ServiceExt;
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Router running the live relay against `server`
fn live_router(server: &MockServer) -> Router {
    let mut config = AppConfig::default();
    config.relay.mode = RelayMode::Live;
    config.upstream.api_key = Some("test-key".to_string());
    config.upstream.base_url = format!("{}/v1", server.uri());
    config.upstream.timeout_secs = 5;

    create_router(Arc::new(AppState::from_config(config).unwrap()))
}

fn submit(query: &str, file_name: &str) -> Request<Body> {
    create_json_request(
        "POST",
        "/api/submit",
        Some(json!({"query": query, "fileName": file_name})),
    )
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["ready"], true);
    assert_eq!(json["backend"], "mock");
}

#[tokio::test]
async fn test_metrics_count_submissions() {
    let app = create_router_for_testing();

    let response = app
        .clone()
        .oneshot(submit("Can I sublet my apartment?", "lease.pdf"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = read_json(response).await;
    assert_eq!(json["total_requests"], 1);
    assert!(json["uptime_seconds"].is_number());
    assert_eq!(json["backend"], "mock");
}

// =============================================================================
// Mock Mode Tests
// =============================================================================

#[tokio::test]
async fn test_mock_submit_success() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(submit("Can I break a lease early?", "lease.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let json = read_json(response).await;
    assert!(json["queryResponse"]
        .as_str()
        .unwrap()
        .contains("Can I break a lease early?"));
    assert!(json["summary"].as_str().unwrap().contains("lease.pdf"));
}

#[tokio::test]
async fn test_mock_submit_waits_configured_delay() {
    let mut config = AppConfig::default();
    config.relay.mode = RelayMode::Mock;
    config.relay.mock_delay_ms = 150;
    let app = create_router(Arc::new(AppState::from_config(config).unwrap()));

    let start = Instant::now();
    let response = app.oneshot(submit("q", "a.txt")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(150));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_submit_missing_query() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/submit",
        Some(json!({"fileName": "lease.pdf"})),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn test_submit_missing_file_name() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/api/submit",
        Some(json!({"query": "Can I break a lease early?"})),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("fileName"));
}

#[tokio::test]
async fn test_submit_blank_query() {
    let app = create_router_for_testing();

    let response = app.oneshot(submit("   ", "lease.pdf")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(json["error"], "query cannot be empty");
}

#[tokio::test]
async fn test_submit_malformed_body() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .method("POST")
        .uri("/api/submit")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_invalid_submission_never_reaches_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let app = live_router(&server);

    let request = create_json_request("POST", "/api/submit", Some(json!({"query": "q"})));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(submit("q", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    server.verify().await;
}

// =============================================================================
// Live Relay Tests
// =============================================================================

#[tokio::test]
async fn test_live_submit_lease_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header_matcher("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Yes, under certain conditions..."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = live_router(&server)
        .oneshot(submit("Can I break a lease early?", "lease.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "queryResponse": "Yes, under certain conditions...",
            "summary": "Summary of lease.pdf: Yes, under certain conditions....."
        })
    );
}

#[tokio::test]
async fn test_live_submit_truncates_long_reply() {
    let server = MockServer::start().await;
    let reply = "x".repeat(450);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": reply}}]
        })))
        .mount(&server)
        .await;

    let response = live_router(&server)
        .oneshot(submit("q", "contract.docx"))
        .await
        .unwrap();

    let json = read_json(response).await;
    assert_eq!(json["queryResponse"], reply);
    assert_eq!(
        json["summary"],
        format!("Summary of contract.docx: {}...", "x".repeat(200))
    );
}

#[tokio::test]
async fn test_live_submit_missing_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let response = live_router(&server)
        .oneshot(submit("q", "lease.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({
            "queryResponse": "No response",
            "summary": "Summary of lease.pdf: No response..."
        })
    );
}

#[tokio::test]
async fn test_live_submit_upstream_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .expect(1)
        .mount(&server)
        .await;

    let response = live_router(&server)
        .oneshot(submit("q", "lease.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({"error": "API request failed"})
    );
}

/// Writer collecting formatted log output for inspection
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn test_upstream_failure_logged_once_with_cause() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let response = live_router(&server)
        .oneshot(submit("q", "lease.pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(!body.to_string().contains("Incorrect API key"));

    let output = logs.contents();
    let error_lines: Vec<&str> = output.lines().filter(|l| l.contains("ERROR")).collect();
    assert_eq!(error_lines.len(), 1, "log output:\n{output}");
    assert!(error_lines[0].contains("API request failed"));
    assert!(error_lines[0].contains("401"));
    assert!(error_lines[0].contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_live_submit_network_failure() {
    let mut config = AppConfig::default();
    config.upstream.base_url = "http://127.0.0.1:1/v1".to_string();
    config.upstream.timeout_secs = 2;
    let app = create_router(Arc::new(AppState::from_config(config).unwrap()));

    let response = app.oneshot(submit("q", "lease.pdf")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({"error": "API request failed"})
    );
}

// =============================================================================
// OpenAPI Tests
// =============================================================================

#[tokio::test]
async fn test_openapi_spec_available() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert!(json["paths"]["/api/submit"].is_object());
}

//! Gemini transport tests against a local mock server.

use std::time::Duration;

use pantry_core::{GeminiConfig, GeminiProvider, LlmError, LlmProvider};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/models/gemini-test:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    let config = GeminiConfig::new("test-key")
        .with_base_url(server.uri())
        .with_model(MODEL);
    GeminiProvider::new(config).unwrap()
}

fn text_envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

#[tokio::test]
async fn test_success_extracts_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({"contents": [{"parts": [{"text": "make dinner"}]}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_envelope("{\"recipes\": []}")))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider_for(&server).complete("make dinner").await.unwrap();
    assert_eq!(text, "{\"recipes\": []}");
}

#[tokio::test]
async fn test_http_error_uses_structured_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete("p").await.unwrap_err();
    match err {
        LlmError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("API key not valid."));
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_without_structured_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete("p").await.unwrap_err();
    assert!(matches!(
        err,
        LlmError::Http {
            status: 503,
            message: None
        }
    ));
    assert!(err.to_string().contains("fetch failed"));
}

#[tokio::test]
async fn test_missing_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete("p").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_envelope("   ")))
        .mount(&server)
        .await;

    let err = provider_for(&server).complete("p").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_envelope("late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-key")
        .with_base_url(server.uri())
        .with_model(MODEL)
        .with_timeout(Duration::from_millis(200));
    let provider = GeminiProvider::new(config).unwrap();

    let err = provider.complete("p").await.unwrap_err();
    match err {
        LlmError::Timeout { after } => assert_eq!(after, Duration::from_millis(200)),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");
    let config = GeminiConfig::new("test-key")
        .with_base_url(uri)
        .with_timeout(Duration::from_secs(5));
    let provider = GeminiProvider::new(config).unwrap();

    let err = provider.complete("p").await.unwrap_err();
    assert!(matches!(err, LlmError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_empty_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_envelope("x")))
        .expect(0)
        .mount(&server)
        .await;

    let config = GeminiConfig::new("").with_base_url(server.uri());
    let provider = GeminiProvider::new(config).unwrap();

    let err = provider.complete("p").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiKeyRequired));
}

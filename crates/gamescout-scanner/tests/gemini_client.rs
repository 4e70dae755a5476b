//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use gamescout_scanner::{GeminiClient, ScanError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn generate_returns_text_and_grounding_references() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "{\"deals\": [], " },
                    { "text": "\"summary\": \"Nothing on sale.\"}" }
                ]
            },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://store.steampowered.com/app/1245620/", "title": "steampowered.com" } },
                    { "retrievedContext": { "uri": "gs://ignored" } },
                    { "web": { "uri": "https://www.gog.com/en/game/elden_ring", "title": "gog.com" } }
                ]
            }
        }]
    });

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "find deals" }] }],
            "tools": [{ "google_search": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .generate("find deals")
        .await
        .expect("should parse response");

    assert_eq!(
        response.text,
        "{\"deals\": [], \"summary\": \"Nothing on sale.\"}"
    );
    assert_eq!(response.grounding_references.len(), 2);
    assert_eq!(
        response.grounding_references[0].uri,
        "https://store.steampowered.com/app/1245620/"
    );
    assert_eq!(response.grounding_references[1].title, "gog.com");
}

#[tokio::test]
async fn generate_without_candidates_yields_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.generate("anything").await.expect("should succeed");

    assert!(response.text.is_empty());
    assert!(response.grounding_references.is_empty());
}

#[tokio::test]
async fn server_error_is_returned_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("anything").await.unwrap_err();

    match &err {
        ScanError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "The model is overloaded.");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(!err.is_configuration());
    assert_eq!(
        err.user_message(),
        "Unable to retrieve market data at this time. Please try again later."
    );
}

#[tokio::test]
async fn rejected_key_is_a_configuration_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("anything").await.unwrap_err();

    assert!(
        matches!(err, ScanError::Api { status: 403, ref message } if message == "forbidden"),
        "got: {err:?}"
    );
    assert!(err.is_configuration());
    assert!(err.user_message().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn non_json_envelope_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("anything").await.unwrap_err();

    assert!(
        matches!(err, ScanError::Deserialize { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn blank_key_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = GeminiClient::with_base_url("", "gemini-2.5-flash", 30, &server.uri()).unwrap_err();
    assert!(matches!(err, ScanError::Configuration(_)), "got: {err:?}");
}

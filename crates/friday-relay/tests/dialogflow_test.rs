//! DialogflowDetector against a local stand-in for the REST endpoint.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};

use friday_core::error::ErrorCode;
use friday_relay::{DialogflowDetector, IntentDetector, RelayConfig, RelayProvider};

async fn detect_intent(
    Path((project, session)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 401, "message": "Request had invalid authentication credentials."}})),
        );
    }
    if project == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "backend unavailable"}})),
        );
    }
    if !session.ends_with(":detectIntent") {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }

    let text = body["queryInput"]["text"]["text"].as_str().unwrap_or_default();
    let language = body["queryInput"]["text"]["languageCode"]
        .as_str()
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "responseId": "r-1",
            "queryResult": {
                "queryText": text,
                "fulfillmentText": format!("[{}] you said: {}", language, text),
                "intent": {"displayName": "echo"},
                "intentDetectionConfidence": 1.0
            }
        })),
    )
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new().route(
        "/v2/projects/:project/agent/sessions/:session",
        post(detect_intent),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr, project: &str, token: &str) -> RelayConfig {
    RelayConfig {
        provider: RelayProvider::Dialogflow,
        project_id: project.to_string(),
        access_token: Some(SecretString::new(token.to_string())),
        base_url: format!("http://{}", addr),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_detect_passes_fulfillment_through() {
    let addr = spawn_server().await;
    let detector = DialogflowDetector::new(&config(addr, "small-talk", "test-token")).unwrap();

    let detected = detector.detect("how's it going").await.unwrap();
    assert_eq!(detected.fulfillment_text, "[en] you said: how's it going");
    assert_eq!(detected.intent_name.as_deref(), Some("echo"));
    assert_eq!(detected.confidence, Some(1.0));
}

#[tokio::test]
async fn test_bad_token_is_authentication_error() {
    let addr = spawn_server().await;
    let detector = DialogflowDetector::new(&config(addr, "small-talk", "wrong")).unwrap();

    let err = detector.detect("hello").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AuthInvalidToken);
    assert!(err.to_string().contains("invalid authentication credentials"));
}

#[tokio::test]
async fn test_server_error_is_relay_error() {
    let addr = spawn_server().await;
    let detector = DialogflowDetector::new(&config(addr, "broken", "test-token")).unwrap();

    let err = detector.detect("hello").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RelayRequestFailed);
    assert!(err.to_string().contains("backend unavailable"));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let detector = DialogflowDetector::new(&config(addr, "small-talk", "test-token")).unwrap();
    let err = detector.detect("hello").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NetConnectionFailed);
}

//! Integration tests for [`RemoteVideoClient`] against a local stand-in for
//! the upstream endpoint.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use reelgen_client::{ClientError, RemoteVideoClient, UpstreamConfig, VideoBackend};
use reelgen_core::generation::GenerationStatus;
use reelgen_core::request::{GenerationRequest, ValidatedRequest};
use reelgen_core::validation::validate_request;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured {
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    headers: Arc<Mutex<Vec<HeaderMap>>>,
}

/// Start a fake upstream that records requests and replies with `status`.
async fn spawn_upstream(status: StatusCode) -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/chat/completions",
            post(
                move |State(captured): State<Captured>,
                      headers: HeaderMap,
                      Json(body): Json<serde_json::Value>| async move {
                    captured.bodies.lock().unwrap().push(body);
                    captured.headers.lock().unwrap().push(headers);
                    (status, Json(serde_json::json!({ "ok": status.is_success() })))
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/chat/completions"), captured)
}

fn config(endpoint: String) -> UpstreamConfig {
    UpstreamConfig {
        endpoint,
        api_key: Some("test-key".into()),
        customer_id: Some("cus_test".into()),
        status_delay: Duration::from_millis(50),
        ..UpstreamConfig::default()
    }
}

fn request(duration: i64) -> ValidatedRequest {
    validate_request(
        &GenerationRequest::new("a cat on a skateboard")
            .with_duration(duration)
            .with_aspect_ratio("9:16")
            .with_style("animation")
            .with_quality("standard"),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_returns_processing_record_with_estimate() {
    let (endpoint, _captured) = spawn_upstream(StatusCode::OK).await;
    let client = RemoteVideoClient::new(config(endpoint));

    let record = client.submit(&request(10)).await.unwrap();
    assert_eq!(record.status, GenerationStatus::Processing);
    assert_eq!(record.progress, Some(0));
    assert_eq!(record.estimated_time, Some(40));
    assert!(!record.id.is_empty());

    let short = client.submit(&request(5)).await.unwrap();
    assert_eq!(short.estimated_time, Some(30));
    assert_ne!(record.id, short.id);
}

#[tokio::test]
async fn submit_defaults_metadata_for_absent_options() {
    let (endpoint, captured) = spawn_upstream(StatusCode::OK).await;
    let client = RemoteVideoClient::new(config(endpoint));

    let bare = validate_request(&GenerationRequest::new("just a prompt")).unwrap();
    let record = client.submit(&bare).await.unwrap();

    assert_eq!(record.estimated_time, Some(40));
    let meta = record.metadata.unwrap();
    assert_eq!(meta.duration, 10);
    assert_eq!(meta.aspect_ratio.as_str(), "16:9");
    assert_eq!(meta.style.as_str(), "realistic");
    assert_eq!(meta.quality.as_str(), "high");

    let bodies = captured.bodies.lock().unwrap();
    assert_eq!(bodies[0]["messages"][0]["content"], "just a prompt");
}

#[tokio::test]
async fn submit_sends_composed_prompt_and_credentials() {
    let (endpoint, captured) = spawn_upstream(StatusCode::OK).await;
    let client = RemoteVideoClient::new(config(endpoint));

    client.submit(&request(8)).await.unwrap();

    let bodies = captured.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["model"], "replicate/google/veo-3");
    assert_eq!(bodies[0]["messages"][0]["role"], "user");
    assert_eq!(
        bodies[0]["messages"][0]["content"],
        "a cat on a skateboard. Style: smooth animation, vibrant colors, stylized movement. \
         vertical portrait format. Duration: 8 seconds"
    );

    let headers = captured.headers.lock().unwrap();
    assert_eq!(headers[0]["authorization"], "Bearer test-key");
    assert_eq!(headers[0]["customerid"], "cus_test");
}

#[tokio::test]
async fn upstream_error_status_becomes_generation_failed() {
    let (endpoint, _captured) = spawn_upstream(StatusCode::BAD_GATEWAY).await;
    let client = RemoteVideoClient::new(config(endpoint));

    let err = client.submit(&request(10)).await.unwrap_err();
    assert_matches!(
        &err,
        ClientError::GenerationFailed(msg) if msg == "API request failed: 502 Bad Gateway"
    );
    assert_eq!(err.code(), "GENERATION_FAILED");
}

#[tokio::test]
async fn unreachable_upstream_becomes_generation_failed() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RemoteVideoClient::new(config(format!("http://{addr}/chat/completions")));
    let err = client.submit(&request(10)).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::GenerationFailed(msg) if msg.starts_with("API request failed")
    );
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_check_completes_after_configured_delay() {
    let client = RemoteVideoClient::new(config("http://unused.invalid".into()));

    let started = Instant::now();
    let record = client.check_status("gen-123").await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(record.id, "gen-123");
    assert_eq!(record.status, GenerationStatus::Completed);
    assert_eq!(record.progress, Some(100));
    assert!(record.video_url.is_some());
    assert!(record.thumbnail_url.is_some());
    assert_eq!(record.metadata.unwrap().processing_time, Some(45));
}

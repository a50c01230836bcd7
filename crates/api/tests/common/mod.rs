#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use reelgen_api::config::ServerConfig;
use reelgen_api::router::build_app_router;
use reelgen_api::state::AppState;
use reelgen_client::{ClientError, UpstreamConfig, VideoBackend};
use reelgen_core::generation::GenerationRecord;
use reelgen_core::request::ValidatedRequest;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        upstream: UpstreamConfig::default(),
    }
}

/// In-memory [`VideoBackend`] recording what it was asked to do.
#[derive(Default)]
pub struct FakeBackend {
    pub fail_with: Option<ClientError>,
    pub submitted: Mutex<Vec<ValidatedRequest>>,
    pub checked: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn failing(err: ClientError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn failure(&self) -> Option<ClientError> {
        self.fail_with.clone()
    }
}

#[async_trait]
impl VideoBackend for FakeBackend {
    async fn submit(&self, request: &ValidatedRequest) -> Result<GenerationRecord, ClientError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(GenerationRecord::processing(
            "gen-test-1",
            request.metadata(Utc::now()),
        ))
    }

    async fn check_status(&self, id: &str) -> Result<GenerationRecord, ClientError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.checked.lock().unwrap().push(id.to_string());
        Ok(GenerationRecord::completed(
            id,
            "https://cdn.test/video.mp4",
            "https://cdn.test/thumb.jpg",
            None,
        ))
    }
}

/// Build the full application router around `backend`.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        backend,
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    post_raw(app, uri, &json.to_string()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

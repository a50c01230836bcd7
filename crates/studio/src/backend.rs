//! [`VideoBackend`] that goes through a running `reelgen-api` server.

use async_trait::async_trait;
use reelgen_client::{ClientError, VideoBackend};
use reelgen_core::generation::GenerationRecord;
use reelgen_core::request::{GenerationRequest, ValidatedRequest};
use serde::Deserialize;

/// Fallback message when a failed submit carries no readable error.
pub const GENERATION_FAILED_MESSAGE: &str = "Generation failed";
/// Fallback message when a failed status check carries no readable error.
pub const STATUS_FAILED_MESSAGE: &str = "Failed to check generation status";

/// Error body returned by the API server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiVideoBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ApiVideoBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode a record, or turn a failed response into the server's error
    /// message (or `fallback` when it has none).
    async fn read_record(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<GenerationRecord, String> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| e.to_string());
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| fallback.to_string());
        tracing::warn!(status = status.as_u16(), error = %message, "API server rejected request");
        Err(message)
    }
}

#[async_trait]
impl VideoBackend for ApiVideoBackend {
    async fn submit(&self, request: &ValidatedRequest) -> Result<GenerationRecord, ClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerationRequest::from(request);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::GenerationFailed(e.to_string()))?;

        Self::read_record(response, GENERATION_FAILED_MESSAGE)
            .await
            .map_err(ClientError::GenerationFailed)
    }

    async fn check_status(&self, id: &str) -> Result<GenerationRecord, ClientError> {
        let url = format!("{}/api/status/{id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::StatusCheckFailed(e.to_string()))?;

        Self::read_record(response, STATUS_FAILED_MESSAGE)
            .await
            .map_err(ClientError::StatusCheckFailed)
    }
}

//! The generation backend seam and its upstream-backed implementation.
//!
//! The upstream API only acknowledges a submission; it exposes no job
//! status. [`RemoteVideoClient::check_status`] therefore simulates one: it
//! waits a fixed delay and reports a completed generation with placeholder
//! media. Replace it with real polling when a status API exists.

use async_trait::async_trait;
use chrono::Utc;
use reelgen_core::generation::{GenerationMetadata, GenerationRecord};
use reelgen_core::prompt::compose_prompt;
use reelgen_core::request::{
    AspectRatio, Quality, ValidatedRequest, VideoStyle, DEFAULT_DURATION_SECS,
};
use uuid::Uuid;

use crate::api::UpstreamApi;
use crate::config::UpstreamConfig;
use crate::error::ClientError;

/// Processing time reported by the simulated status check, in seconds.
pub const SIMULATED_PROCESSING_TIME_SECS: u32 = 45;
/// Prompt echoed in the simulated status check's metadata.
pub const SIMULATED_STATUS_PROMPT: &str = "Sample video generation";

/// Something that can start a generation and report on it.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Start a generation. Resolves to a record in `processing` state.
    async fn submit(&self, request: &ValidatedRequest) -> Result<GenerationRecord, ClientError>;

    /// Current state of the generation with `id`.
    async fn check_status(&self, id: &str) -> Result<GenerationRecord, ClientError>;
}

/// [`VideoBackend`] talking to the upstream model API.
pub struct RemoteVideoClient {
    api: UpstreamApi,
    config: UpstreamConfig,
}

impl RemoteVideoClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            api: UpstreamApi::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Metadata attached to simulated status results.
    fn simulated_metadata(&self) -> GenerationMetadata {
        GenerationMetadata {
            prompt: SIMULATED_STATUS_PROMPT.to_string(),
            duration: DEFAULT_DURATION_SECS,
            aspect_ratio: AspectRatio::default(),
            style: VideoStyle::default(),
            quality: Quality::default(),
            created_at: Utc::now(),
            processing_time: Some(SIMULATED_PROCESSING_TIME_SECS),
        }
    }
}

/// Fresh opaque generation id.
pub fn new_generation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl VideoBackend for RemoteVideoClient {
    async fn submit(&self, request: &ValidatedRequest) -> Result<GenerationRecord, ClientError> {
        let prompt = compose_prompt(request);
        tracing::debug!(endpoint = %self.api.endpoint(), prompt = %prompt, "Submitting generation");

        self.api.submit_prompt(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Video generation request failed");
            ClientError::GenerationFailed(e.to_string())
        })?;

        let record =
            GenerationRecord::processing(new_generation_id(), request.metadata(Utc::now()));
        tracing::info!(
            id = %record.id,
            estimated_time = record.estimated_time,
            "Generation accepted",
        );
        Ok(record)
    }

    async fn check_status(&self, id: &str) -> Result<GenerationRecord, ClientError> {
        tokio::time::sleep(self.config.status_delay).await;
        Ok(GenerationRecord::completed(
            id,
            self.config.placeholder_video_url.clone(),
            self.config.placeholder_thumbnail_url.clone(),
            Some(self.simulated_metadata()),
        ))
    }
}

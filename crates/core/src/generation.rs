//! Generation record lifecycle.
//!
//! A record is created in [`GenerationStatus::Processing`] when a request is
//! accepted upstream and moves to a terminal status exactly once.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::request::{AspectRatio, Quality, VideoStyle};
use crate::types::{GenerationId, Timestamp};

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Lower bound on the advisory processing estimate, in seconds.
pub const MIN_ESTIMATED_SECS: u32 = 30;
/// Estimated processing seconds per second of output video.
pub const ESTIMATE_SECS_PER_VIDEO_SEC: u32 = 4;

/// Advisory processing time for a clip of `duration_secs`.
///
/// A heuristic (`max(30, duration * 4)`), not a measurement.
pub fn estimate_processing_time(duration_secs: u32) -> u32 {
    MIN_ESTIMATED_SECS.max(duration_secs.saturating_mul(ESTIMATE_SECS_PER_VIDEO_SEC))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Error,
}

impl GenerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
            GenerationStatus::Error => "error",
        }
    }

    /// Terminal statuses are never left once reached.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GenerationStatus::Completed | GenerationStatus::Failed | GenerationStatus::Error
        )
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Echo of the originating request, with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub prompt: String,
    pub duration: u32,
    pub aspect_ratio: AspectRatio,
    pub style: VideoStyle,
    pub quality: Quality,
    pub created_at: Timestamp,
    /// Seconds from submission to completion, set once finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: GenerationId,
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Percentage in `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Advisory seconds until completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
}

impl GenerationRecord {
    /// A freshly accepted generation.
    pub fn processing(id: impl Into<GenerationId>, metadata: GenerationMetadata) -> Self {
        let estimated_time = estimate_processing_time(metadata.duration);
        Self {
            id: id.into(),
            status: GenerationStatus::Processing,
            video_url: None,
            thumbnail_url: None,
            progress: Some(0),
            estimated_time: Some(estimated_time),
            error: None,
            metadata: Some(metadata),
        }
    }

    /// A finished generation with its media locations.
    pub fn completed(
        id: impl Into<GenerationId>,
        video_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
        metadata: Option<GenerationMetadata>,
    ) -> Self {
        Self {
            id: id.into(),
            status: GenerationStatus::Completed,
            video_url: Some(video_url.into()),
            thumbnail_url: Some(thumbnail_url.into()),
            progress: Some(100),
            estimated_time: None,
            error: None,
            metadata,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fold a status update for the same generation into this record.
    ///
    /// Media locations and status come from `update`. This record's metadata
    /// is kept (it reflects what was actually requested); its
    /// `processing_time` is taken from `update` when present, otherwise from
    /// `fallback_processing_time`.
    pub fn apply_update(
        &mut self,
        update: GenerationRecord,
        fallback_processing_time: u32,
    ) -> Result<(), CoreError> {
        if self.is_finished() {
            return Err(CoreError::AlreadyFinished {
                id: self.id.clone(),
                status: self.status,
            });
        }

        let processing_time = update
            .metadata
            .as_ref()
            .and_then(|m| m.processing_time)
            .unwrap_or(fallback_processing_time);

        self.status = update.status;
        self.progress = update.progress.or(self.progress);
        self.video_url = update.video_url;
        self.thumbnail_url = update.thumbnail_url;
        self.error = update.error;
        if self.status.is_terminal() {
            self.estimated_time = None;
        }
        match self.metadata.as_mut() {
            Some(metadata) => metadata.processing_time = Some(processing_time),
            None => self.metadata = update.metadata,
        }
        Ok(())
    }

    /// Move an unfinished record to [`GenerationStatus::Error`].
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        if self.is_finished() {
            return Err(CoreError::AlreadyFinished {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = GenerationStatus::Error;
        self.error = Some(message.into());
        self.estimated_time = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn metadata(duration: u32) -> GenerationMetadata {
        GenerationMetadata {
            prompt: "lighthouse in a storm".into(),
            duration,
            aspect_ratio: AspectRatio::Widescreen,
            style: VideoStyle::Cinematic,
            quality: Quality::Ultra,
            created_at: Utc::now(),
            processing_time: None,
        }
    }

    #[test]
    fn estimate_has_a_thirty_second_floor() {
        assert_eq!(estimate_processing_time(5), 30);
        assert_eq!(estimate_processing_time(7), 30);
        assert_eq!(estimate_processing_time(10), 40);
        assert_eq!(estimate_processing_time(30), 120);
    }

    #[test]
    fn processing_record_starts_at_zero() {
        let record = GenerationRecord::processing("gen-1", metadata(10));
        assert_eq!(record.status, GenerationStatus::Processing);
        assert_eq!(record.progress, Some(0));
        assert_eq!(record.estimated_time, Some(40));
        assert!(record.video_url.is_none());
        assert!(!record.is_finished());
    }

    #[test]
    fn record_serializes_camel_case_and_omits_absent_fields() {
        let record = GenerationRecord::processing("gen-1", metadata(7));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["estimatedTime"], 30);
        assert_eq!(json["metadata"]["aspectRatio"], "16:9");
        assert!(json.get("videoUrl").is_none());
        assert!(json.get("error").is_none());
        assert!(json["metadata"].get("processingTime").is_none());
    }

    #[test]
    fn update_keeps_requested_metadata_and_sets_processing_time() {
        let mut record = GenerationRecord::processing("gen-1", metadata(10));
        let mut update_meta = metadata(10);
        update_meta.prompt = "placeholder".into();
        update_meta.processing_time = Some(45);
        let update = GenerationRecord::completed("gen-1", "v.mp4", "t.png", Some(update_meta));

        record.apply_update(update, 12).unwrap();

        assert_eq!(record.status, GenerationStatus::Completed);
        assert_eq!(record.progress, Some(100));
        assert_eq!(record.video_url.as_deref(), Some("v.mp4"));
        assert_eq!(record.estimated_time, None);
        let meta = record.metadata.unwrap();
        assert_eq!(meta.prompt, "lighthouse in a storm");
        assert_eq!(meta.processing_time, Some(45));
    }

    #[test]
    fn update_falls_back_to_measured_processing_time() {
        let mut record = GenerationRecord::processing("gen-1", metadata(10));
        let update = GenerationRecord::completed("gen-1", "v.mp4", "t.png", None);
        record.apply_update(update, 17).unwrap();
        assert_eq!(record.metadata.unwrap().processing_time, Some(17));
    }

    #[test]
    fn terminal_records_reject_further_transitions() {
        let mut record = GenerationRecord::completed("gen-1", "v.mp4", "t.png", None);
        let update = GenerationRecord::completed("gen-1", "other.mp4", "t.png", None);
        assert_matches!(
            record.apply_update(update, 1),
            Err(CoreError::AlreadyFinished { status: GenerationStatus::Completed, .. })
        );
        assert_matches!(record.fail("boom"), Err(CoreError::AlreadyFinished { .. }));
        assert_eq!(record.video_url.as_deref(), Some("v.mp4"));
    }

    #[test]
    fn fail_moves_to_error() {
        let mut record = GenerationRecord::processing("gen-1", metadata(10));
        record.fail("upstream timed out").unwrap();
        assert_eq!(record.status, GenerationStatus::Error);
        assert_eq!(record.error.as_deref(), Some("upstream timed out"));
        assert!(record.is_finished());
    }
}

//! History entries and the history list query.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::generation::{GenerationRecord, GenerationStatus};
use crate::request::{AspectRatio, Quality, VideoStyle, DEFAULT_DURATION_SECS};
use crate::types::{sanitize_file_stem, GenerationId, Timestamp};

/// Display-oriented summary of one completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: GenerationId,
    pub prompt: String,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub duration: u32,
    pub aspect_ratio: AspectRatio,
    pub style: VideoStyle,
    pub quality: Quality,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u32>,
}

impl HistoryEntry {
    /// Flatten a record into a history entry.
    ///
    /// Returns `None` unless the record is completed and has a video URL.
    /// Missing metadata falls back to the request defaults.
    pub fn from_record(record: &GenerationRecord) -> Option<Self> {
        if record.status != GenerationStatus::Completed {
            return None;
        }
        let video_url = record.video_url.clone().filter(|url| !url.is_empty())?;

        let entry = match &record.metadata {
            Some(meta) => Self {
                id: record.id.clone(),
                prompt: meta.prompt.clone(),
                video_url,
                thumbnail_url: record.thumbnail_url.clone(),
                duration: meta.duration,
                aspect_ratio: meta.aspect_ratio,
                style: meta.style,
                quality: meta.quality,
                created_at: meta.created_at,
                processing_time: meta.processing_time,
            },
            None => Self {
                id: record.id.clone(),
                prompt: String::new(),
                video_url,
                thumbnail_url: record.thumbnail_url.clone(),
                duration: DEFAULT_DURATION_SECS,
                aspect_ratio: AspectRatio::default(),
                style: VideoStyle::default(),
                quality: Quality::default(),
                created_at: Utc::now(),
                processing_time: None,
            },
        };
        Some(entry)
    }

    /// File name used when downloading this entry's video. The id comes
    /// from the server, so it is reduced to a single safe path component.
    pub fn download_file_name(&self) -> String {
        format!("video_{}.mp4", sanitize_file_stem(&self.id))
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySort {
    /// Most recently created first.
    #[default]
    Newest,
    Oldest,
    /// Longest clip first.
    Duration,
}

impl HistorySort {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(HistorySort::Newest),
            "oldest" => Some(HistorySort::Oldest),
            "duration" => Some(HistorySort::Duration),
            _ => None,
        }
    }
}

/// Search, filter and ordering applied to a history listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against the prompt.
    pub search: Option<String>,
    pub style: Option<VideoStyle>,
    pub sort: HistorySort,
}

impl HistoryQuery {
    /// Whether any narrowing filter is active.
    pub fn is_filtered(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty()) || self.style.is_some()
    }

    /// Return the matching entries in the requested order. The input is not
    /// modified.
    pub fn apply(&self, entries: &[HistoryEntry]) -> Vec<HistoryEntry> {
        let needle = self
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|entry| match &needle {
                Some(needle) => entry.prompt.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|entry| self.style.is_none_or(|style| entry.style == style))
            .cloned()
            .collect();

        // Stable sort keeps stored order for ties.
        match self.sort {
            HistorySort::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            HistorySort::Oldest => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            HistorySort::Duration => matched.sort_by(|a, b| b.duration.cmp(&a.duration)),
        }
        matched
    }
}

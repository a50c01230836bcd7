//! The `generate` form.
//!
//! Every option has a default, so the request always carries all four
//! settings and the composed prompt always has every clause.

use clap::Args;
use reelgen_core::request::{
    AspectRatio, GenerationRequest, Quality, VideoStyle, DEFAULT_DURATION_SECS,
};

#[derive(Debug, Clone, Args)]
pub struct GenerateForm {
    /// What the video should show
    pub prompt: String,

    /// Length in seconds (5-30)
    #[arg(short, long, default_value_t = i64::from(DEFAULT_DURATION_SECS))]
    pub duration: i64,

    /// Aspect ratio (16:9, 9:16, 1:1)
    #[arg(short, long, default_value_t = AspectRatio::default().to_string())]
    pub aspect_ratio: String,

    /// Style preset (see `styles`)
    #[arg(short, long, default_value_t = VideoStyle::default().to_string())]
    pub style: String,

    /// Quality (standard, high, ultra)
    #[arg(short, long, default_value_t = Quality::default().to_string())]
    pub quality: String,
}

impl GenerateForm {
    /// The request this form submits. The prompt is trimmed.
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.prompt.trim())
            .with_duration(self.duration)
            .with_aspect_ratio(self.aspect_ratio.clone())
            .with_style(self.style.clone())
            .with_quality(self.quality.clone())
    }
}

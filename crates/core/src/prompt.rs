//! Prompt composition.
//!
//! The upstream model takes a single free-text prompt, so the request
//! options are folded into it as descriptive suffix clauses. Clause order is
//! fixed (style, aspect ratio, duration, quality) and must stay stable.

use crate::request::{AspectRatio, Quality, ValidatedRequest, VideoStyle};

/// Descriptive phrase appended for each style.
pub fn style_phrase(style: VideoStyle) -> &'static str {
    match style {
        VideoStyle::Cinematic => {
            "cinematic lighting, professional film quality, dramatic composition"
        }
        VideoStyle::Documentary => {
            "realistic documentary style, natural lighting, authentic feel"
        }
        VideoStyle::Animation => "smooth animation, vibrant colors, stylized movement",
        VideoStyle::Realistic => "photorealistic, natural lighting, high detail",
        VideoStyle::Artistic => {
            "creative artistic style, unique visual aesthetic, experimental"
        }
    }
}

/// Format phrase appended for each aspect ratio.
pub fn aspect_ratio_phrase(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Widescreen => "widescreen format",
        AspectRatio::Portrait => "vertical portrait format",
        AspectRatio::Square => "square format",
    }
}

/// Quality clause, if the tier adds one. `standard` adds nothing.
pub fn quality_phrase(quality: Quality) -> Option<&'static str> {
    match quality {
        Quality::Standard => None,
        Quality::High => Some("High quality, detailed rendering"),
        Quality::Ultra => Some("Ultra high quality, 4K resolution"),
    }
}

/// Build the prompt sent upstream.
///
/// Only options present on the request contribute a clause.
pub fn compose_prompt(request: &ValidatedRequest) -> String {
    let mut prompt = request.prompt.clone();

    if let Some(style) = request.style {
        prompt.push_str(". Style: ");
        prompt.push_str(style_phrase(style));
    }
    if let Some(aspect_ratio) = request.aspect_ratio {
        prompt.push_str(". ");
        prompt.push_str(aspect_ratio_phrase(aspect_ratio));
    }
    if let Some(duration) = request.duration {
        prompt.push_str(&format!(". Duration: {duration} seconds"));
    }
    if let Some(clause) = request.quality.and_then(quality_phrase) {
        prompt.push_str(". ");
        prompt.push_str(clause);
    }

    prompt
}

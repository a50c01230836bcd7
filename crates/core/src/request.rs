//! Generation request types.
//!
//! [`GenerationRequest`] is the untrusted shape accepted from callers: the
//! option fields are raw strings so that an unknown value reaches
//! [`crate::validation::validate_request`] and produces a field-specific
//! message instead of a deserialization error. Validation turns it into a
//! [`ValidatedRequest`] carrying the typed enums below.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::generation::GenerationMetadata;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shortest clip the upstream model accepts, in seconds.
pub const MIN_DURATION_SECS: u32 = 5;
/// Longest clip the upstream model accepts, in seconds.
pub const MAX_DURATION_SECS: u32 = 30;
/// Duration assumed when the request omits one.
pub const DEFAULT_DURATION_SECS: u32 = 10;

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

macro_rules! define_option_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }

            /// Parse the wire representation. Returns `None` for unknown values.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

define_option_enum! {
    /// Output frame shape.
    AspectRatio {
        Widescreen = "16:9",
        Portrait = "9:16",
        Square = "1:1",
    }
}

define_option_enum! {
    /// Visual style preset.
    VideoStyle {
        Cinematic = "cinematic",
        Documentary = "documentary",
        Animation = "animation",
        Realistic = "realistic",
        Artistic = "artistic",
    }
}

define_option_enum! {
    /// Render quality tier.
    Quality {
        Standard = "standard",
        High = "high",
        Ultra = "ultra",
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Widescreen
    }
}

impl Default for VideoStyle {
    fn default() -> Self {
        VideoStyle::Realistic
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::High
    }
}

impl VideoStyle {
    /// Display name shown in preset listings.
    pub fn label(self) -> &'static str {
        match self {
            VideoStyle::Cinematic => "Cinematic",
            VideoStyle::Documentary => "Documentary",
            VideoStyle::Animation => "Animation",
            VideoStyle::Realistic => "Realistic",
            VideoStyle::Artistic => "Artistic",
        }
    }

    /// One-line summary shown next to the preset name.
    pub fn description(self) -> &'static str {
        match self {
            VideoStyle::Cinematic => "Professional film quality with dramatic lighting",
            VideoStyle::Documentary => "Realistic style with natural lighting",
            VideoStyle::Animation => "Smooth animated style with vibrant colors",
            VideoStyle::Realistic => "Photorealistic with high detail",
            VideoStyle::Artistic => "Creative and experimental visual style",
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A generation request as received from a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-text description of the desired video.
    #[serde(default, deserialize_with = "prompt_or_empty")]
    pub prompt: String,
    /// Clip length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// A `null` or non-string prompt decodes as empty, so validation reports
/// it with the prompt message rather than a decoding error.
fn prompt_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PromptField {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match PromptField::deserialize(deserializer)? {
        PromptField::Text(text) => text,
        PromptField::Other(_) => String::new(),
    })
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }
}

/// A request that passed validation. Absent options stay `None`; the
/// `*_or_default` accessors apply the platform defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub prompt: String,
    pub duration: Option<u32>,
    pub aspect_ratio: Option<AspectRatio>,
    pub style: Option<VideoStyle>,
    pub quality: Option<Quality>,
}

impl ValidatedRequest {
    pub fn duration_or_default(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_SECS)
    }

    pub fn aspect_ratio_or_default(&self) -> AspectRatio {
        self.aspect_ratio.unwrap_or_default()
    }

    pub fn style_or_default(&self) -> VideoStyle {
        self.style.unwrap_or_default()
    }

    pub fn quality_or_default(&self) -> Quality {
        self.quality.unwrap_or_default()
    }

    /// Echo of this request stored on the generation record.
    pub fn metadata(&self, created_at: Timestamp) -> GenerationMetadata {
        GenerationMetadata {
            prompt: self.prompt.clone(),
            duration: self.duration_or_default(),
            aspect_ratio: self.aspect_ratio_or_default(),
            style: self.style_or_default(),
            quality: self.quality_or_default(),
            created_at,
            processing_time: None,
        }
    }
}

impl From<&ValidatedRequest> for GenerationRequest {
    fn from(request: &ValidatedRequest) -> Self {
        Self {
            prompt: request.prompt.clone(),
            duration: request.duration.map(i64::from),
            aspect_ratio: request.aspect_ratio.map(|v| v.as_str().to_string()),
            style: request.style.map(|v| v.as_str().to_string()),
            quality: request.quality.map(|v| v.as_str().to_string()),
        }
    }
}

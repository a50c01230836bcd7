//! Request validation.
//!
//! Checks run in a fixed order (prompt, duration, aspect ratio, style,
//! quality) and the first failure is reported.

use crate::error::CoreError;
use crate::request::{
    AspectRatio, GenerationRequest, Quality, ValidatedRequest, VideoStyle, MAX_DURATION_SECS,
    MIN_DURATION_SECS,
};

pub const PROMPT_REQUIRED_MESSAGE: &str = "Prompt is required and cannot be empty";
pub const DURATION_RANGE_MESSAGE: &str = "Duration must be between 5 and 30 seconds";
pub const ASPECT_RATIO_MESSAGE: &str = "Invalid aspect ratio. Must be 16:9, 9:16, or 1:1";
pub const STYLE_MESSAGE: &str =
    "Invalid style. Must be one of: cinematic, documentary, animation, realistic, artistic";
pub const QUALITY_MESSAGE: &str = "Invalid quality. Must be standard, high, or ultra";

/// Validate a raw request and convert it into a [`ValidatedRequest`].
///
/// Absent optional fields are accepted and stay absent.
pub fn validate_request(request: &GenerationRequest) -> Result<ValidatedRequest, CoreError> {
    validate_prompt(&request.prompt)?;
    let duration = request.duration.map(validate_duration).transpose()?;
    let aspect_ratio = parse_option(
        request.aspect_ratio.as_deref(),
        AspectRatio::parse,
        ASPECT_RATIO_MESSAGE,
    )?;
    let style = parse_option(request.style.as_deref(), VideoStyle::parse, STYLE_MESSAGE)?;
    let quality = parse_option(request.quality.as_deref(), Quality::parse, QUALITY_MESSAGE)?;

    Ok(ValidatedRequest {
        prompt: request.prompt.clone(),
        duration,
        aspect_ratio,
        style,
        quality,
    })
}

/// The prompt must contain at least one non-whitespace character.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::InvalidRequest(PROMPT_REQUIRED_MESSAGE.to_string()));
    }
    Ok(())
}

/// Duration must fall within `[MIN_DURATION_SECS, MAX_DURATION_SECS]`.
pub fn validate_duration(duration: i64) -> Result<u32, CoreError> {
    let range = i64::from(MIN_DURATION_SECS)..=i64::from(MAX_DURATION_SECS);
    if !range.contains(&duration) {
        return Err(CoreError::InvalidRequest(DURATION_RANGE_MESSAGE.to_string()));
    }
    // In range, so the narrowing cannot truncate.
    Ok(duration as u32)
}

fn parse_option<T>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    message: &str,
) -> Result<Option<T>, CoreError> {
    match value {
        None => Ok(None),
        Some(raw) => parse(raw)
            .map(Some)
            .ok_or_else(|| CoreError::InvalidRequest(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid() -> GenerationRequest {
        GenerationRequest::new("a cat on a skateboard")
            .with_duration(8)
            .with_aspect_ratio("9:16")
            .with_style("animation")
            .with_quality("standard")
    }

    fn message(result: Result<ValidatedRequest, CoreError>) -> String {
        match result {
            Err(CoreError::InvalidRequest(msg)) => msg,
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn accepts_fully_specified_request() {
        let validated = validate_request(&valid()).unwrap();
        assert_eq!(validated.duration, Some(8));
        assert_eq!(validated.aspect_ratio, Some(AspectRatio::Portrait));
        assert_eq!(validated.style, Some(VideoStyle::Animation));
        assert_eq!(validated.quality, Some(Quality::Standard));
    }

    #[test]
    fn accepts_prompt_only_request() {
        let validated = validate_request(&GenerationRequest::new("sunset")).unwrap();
        assert_eq!(validated.duration, None);
        assert_eq!(validated.style, None);
    }

    #[test]
    fn rejects_empty_and_whitespace_prompt_before_other_fields() {
        for prompt in ["", "   ", "\n\t"] {
            let mut request = valid();
            request.prompt = prompt.to_string();
            request.style = Some("vaporwave".into());
            assert_eq!(message(validate_request(&request)), PROMPT_REQUIRED_MESSAGE);
        }
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        for duration in 5..=30 {
            assert!(validate_request(&valid().with_duration(duration)).is_ok());
        }
        for duration in [-1, 0, 4, 31, 120] {
            assert_eq!(
                message(validate_request(&valid().with_duration(duration))),
                DURATION_RANGE_MESSAGE
            );
        }
    }

    #[test]
    fn rejects_unknown_aspect_ratio() {
        let request = valid().with_aspect_ratio("4:3");
        assert_eq!(message(validate_request(&request)), ASPECT_RATIO_MESSAGE);
    }

    #[test]
    fn rejects_unknown_style() {
        for style in ["noir", "Cinematic", ""] {
            let request = valid().with_style(style);
            assert_eq!(message(validate_request(&request)), STYLE_MESSAGE);
        }
    }

    #[test]
    fn rejects_unknown_quality() {
        let request = valid().with_quality("8k");
        assert_matches!(validate_request(&request), Err(CoreError::InvalidRequest(_)));
        assert_eq!(message(validate_request(&request)), QUALITY_MESSAGE);
    }

    #[test]
    fn prompt_is_kept_verbatim() {
        let validated = validate_request(&GenerationRequest::new("  padded  ")).unwrap();
        assert_eq!(validated.prompt, "  padded  ");
    }
}

use std::time::Duration;

/// Default upstream chat-completions endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://oi-server.onrender.com/chat/completions";
/// Default video model identifier.
pub const DEFAULT_MODEL: &str = "replicate/google/veo-3";
/// Default simulated status-check delay in milliseconds.
pub const DEFAULT_STATUS_DELAY_MS: u64 = 2_000;
/// Placeholder media returned by the simulated status check.
pub const DEFAULT_PLACEHOLDER_VIDEO_URL: &str =
    "https://storage.googleapis.com/reelgen-samples/sample-generation.mp4";
pub const DEFAULT_PLACEHOLDER_THUMBNAIL_URL: &str =
    "https://storage.googleapis.com/reelgen-samples/sample-generation.png";

/// Upstream API configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Generation endpoint receiving the composed prompt.
    pub endpoint: String,
    /// Model name sent with every request.
    pub model: String,
    /// Bearer token for the `Authorization` header, if any.
    pub api_key: Option<String>,
    /// Value for the `customerId` header, if any.
    pub customer_id: Option<String>,
    /// Fixed delay before the simulated status check resolves.
    pub status_delay: Duration,
    pub placeholder_video_url: String,
    pub placeholder_thumbnail_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            customer_id: None,
            status_delay: Duration::from_millis(DEFAULT_STATUS_DELAY_MS),
            placeholder_video_url: DEFAULT_PLACEHOLDER_VIDEO_URL.to_string(),
            placeholder_thumbnail_url: DEFAULT_PLACEHOLDER_THUMBNAIL_URL.to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                                   |
    /// |----------------------------------|-------------------------------------------|
    /// | `REELGEN_UPSTREAM_URL`           | `https://oi-server.onrender.com/chat/completions` |
    /// | `REELGEN_MODEL`                  | `replicate/google/veo-3`                  |
    /// | `REELGEN_API_KEY`                | unset                                     |
    /// | `REELGEN_CUSTOMER_ID`            | unset                                     |
    /// | `REELGEN_STATUS_DELAY_MS`        | `2000`                                    |
    /// | `REELGEN_PLACEHOLDER_VIDEO_URL`  | sample clip                               |
    /// | `REELGEN_PLACEHOLDER_THUMBNAIL_URL` | sample still                           |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let status_delay_ms: u64 = std::env::var("REELGEN_STATUS_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_STATUS_DELAY_MS.to_string())
            .parse()
            .expect("REELGEN_STATUS_DELAY_MS must be a valid u64");

        Self {
            endpoint: std::env::var("REELGEN_UPSTREAM_URL").unwrap_or(defaults.endpoint),
            model: std::env::var("REELGEN_MODEL").unwrap_or(defaults.model),
            api_key: non_empty_var("REELGEN_API_KEY"),
            customer_id: non_empty_var("REELGEN_CUSTOMER_ID"),
            status_delay: Duration::from_millis(status_delay_ms),
            placeholder_video_url: std::env::var("REELGEN_PLACEHOLDER_VIDEO_URL")
                .unwrap_or(defaults.placeholder_video_url),
            placeholder_thumbnail_url: std::env::var("REELGEN_PLACEHOLDER_THUMBNAIL_URL")
                .unwrap_or(defaults.placeholder_thumbnail_url),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

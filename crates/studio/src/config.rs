use std::path::PathBuf;
use std::time::Duration;

/// Default address of the reelgen API server.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
/// Default interval between progress ticks, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Runtime settings for the studio.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Base URL of the reelgen API server.
    pub api_url: String,
    /// Directory holding the history store.
    pub data_dir: PathBuf,
    /// Interval between progress ticks.
    pub tick_interval: Duration,
}

impl StudioConfig {
    /// Settings from environment variables with defaults.
    ///
    /// | Env Var            | Default                      |
    /// |--------------------|------------------------------|
    /// | `REELGEN_API_URL`  | `http://localhost:3000`      |
    /// | `REELGEN_DATA_DIR` | see [`default_data_dir`]     |
    /// | `REELGEN_TICK_MS`  | `1000`                       |
    pub fn from_env() -> Self {
        let api_url = std::env::var("REELGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let data_dir = std::env::var("REELGEN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let tick_ms: u64 = std::env::var("REELGEN_TICK_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TICK_MS);

        Self {
            api_url,
            data_dir,
            tick_interval: Duration::from_millis(tick_ms.max(1)),
        }
    }
}

/// Per-user data directory (`<data_local_dir>/reelgen`), falling back to
/// `./.reelgen` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("reelgen"))
        .unwrap_or_else(|| PathBuf::from(".reelgen"))
}

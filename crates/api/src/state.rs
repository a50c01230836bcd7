use std::sync::Arc;

use reelgen_client::VideoBackend;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backend that generation requests are forwarded to.
    pub backend: Arc<dyn VideoBackend>,
}

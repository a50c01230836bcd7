pub mod generation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /generate                 GET info, POST start a generation
/// /status/{id}              GET generation status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(generation::router())
}

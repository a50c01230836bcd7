use axum::routing::get;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Generation routes, nested under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/generate",
            get(generation::generate_info).post(generation::generate),
        )
        .route("/status/{id}", get(generation::get_status))
}

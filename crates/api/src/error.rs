use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reelgen_client::ClientError;
use reelgen_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`ClientError`] for upstream
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent `{ "error", "code" }` JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `reelgen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The generation backend failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::AlreadyFinished { .. } => {
                    (StatusCode::CONFLICT, "CONFLICT", core.to_string())
                }
            },

            // --- Backend errors: the downstream message is passed through ---
            AppError::Client(err) => {
                tracing::error!(error = %err, code = err.code(), "Generation backend error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.code(), err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

//! Handlers for video generation.
//!
//! Routes:
//! - `GET   /generate`       describe the endpoint
//! - `POST  /generate`       validate and start a generation
//! - `GET   /status/{id}`    status of a generation

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use reelgen_core::generation::GenerationRecord;
use reelgen_core::request::GenerationRequest;
use reelgen_core::validation::validate_request;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body of `GET /api/generate`.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub message: &'static str,
    pub endpoints: EndpointList,
}

#[derive(Debug, Serialize)]
pub struct EndpointList {
    pub generate: &'static str,
    pub status: &'static str,
}

/// GET /api/generate
pub async fn generate_info() -> Json<EndpointInfo> {
    Json(EndpointInfo {
        message: "Video generation API",
        endpoints: EndpointList {
            generate: "POST /api/generate",
            status: "GET /api/status/{id}",
        },
    })
}

/// POST /api/generate
///
/// Validates the request, forwards it to the backend, and returns the
/// `processing` record. The record is returned bare, without an envelope.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> AppResult<Json<GenerationRecord>> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let request = validate_request(&input)?;
    let record = state.backend.submit(&request).await?;

    tracing::info!(
        id = %record.id,
        duration = request.duration_or_default(),
        style = %request.style_or_default(),
        "Generation started",
    );

    Ok(Json(record))
}

/// GET /api/status/{id}
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GenerationRecord>> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("Generation ID is required".into()));
    }

    let record = state.backend.check_status(id).await?;
    Ok(Json(record))
}

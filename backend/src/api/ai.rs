//! Video generation handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};

use super::server::AppState;
use crate::error::ApiResult;
use crate::jobs::{GenerationAccepted, GenerationRequest, GenerationStatus};
use crate::models::DEFAULT_OWNER_ID;

/// `POST /api/v1/ai/generate-video/`
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> ApiResult<Json<GenerationAccepted>> {
    let (accepted, _job) = state.jobs.start(request, DEFAULT_OWNER_ID).await?;
    Ok(Json(accepted))
}

/// `GET /api/v1/ai/status/{id}`
pub async fn status(
    State(state): State<AppState>,
    Path(trip_id): Path<u64>,
) -> ApiResult<Json<GenerationStatus>> {
    let status = state.jobs.status(trip_id, DEFAULT_OWNER_ID).await?;
    Ok(Json(status))
}

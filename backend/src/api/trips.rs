//! Trip CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use super::logs::{log_trip, log_warning, LogLevel};
use super::server::AppState;
use super::types::{MessageResponse, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{Trip, TripCreate, TripUpdate, TripView, DEFAULT_OWNER_ID};
use crate::store::TripStore;
use crate::uploads;

/// The trip if it exists and belongs to `owner_id`.
pub(crate) fn owned_trip(store: &TripStore, id: u64, owner_id: u64) -> ApiResult<&Trip> {
    let trip = store
        .trip(id)
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    if trip.owner_id != owner_id {
        return Err(ApiError::BadRequest("Not enough permissions".into()));
    }
    Ok(trip)
}

fn view(store: &TripStore, id: u64) -> ApiResult<TripView> {
    store
        .trip_view(id)
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<TripView>>> {
    let store = state.store.lock().await;
    let trips = store
        .trips_by_owner(DEFAULT_OWNER_ID, page.skip, page.limit)
        .iter()
        .map(|t| view(&store, t.id))
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(trips))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<TripCreate>,
) -> ApiResult<Json<TripView>> {
    let mut store = state.store.lock().await;
    let trip = store.create_trip(input, DEFAULT_OWNER_ID)?;
    log_trip(LogLevel::Success, trip.id, format!("Created trip \"{}\"", trip.title));
    Ok(Json(TripView { trip, media_files: Vec::new() }))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<TripView>> {
    let store = state.store.lock().await;
    owned_trip(&store, id, DEFAULT_OWNER_ID)?;
    let trip = view(&store, id)?;
    Ok(Json(trip))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<TripUpdate>,
) -> ApiResult<Json<TripView>> {
    let mut store = state.store.lock().await;
    owned_trip(&store, id, DEFAULT_OWNER_ID)?;
    store.update_trip(id, update)?;
    let trip = view(&store, id)?;
    Ok(Json(trip))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MessageResponse>> {
    let media = {
        let mut store = state.store.lock().await;
        owned_trip(&store, id, DEFAULT_OWNER_ID)?;
        store.delete_trip(id)?.1
    };

    for file in &media {
        if let Err(e) = uploads::remove_file(&file.file_path).await {
            log_warning(format!("Could not remove {}: {}", file.file_path, e));
        }
    }
    log_trip(LogLevel::Info, id, format!("Deleted trip and {} files", media.len()));

    Ok(Json(MessageResponse::new("Trip deleted successfully")))
}

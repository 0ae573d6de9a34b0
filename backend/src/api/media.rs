//! Media upload handlers.
//!
//! `POST /upload/` is what the browser client calls: files keep their
//! original names and linking to a trip is optional. The `/api/v1/upload`
//! endpoints always work on a trip and store files under generated names.

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};

use super::logs::{log_success, log_trip, log_warning, LogLevel};
use super::server::AppState;
use super::trips::owned_trip;
use super::types::{MessageResponse, UploadReceipt};
use crate::error::{ApiError, ApiResult};
use crate::models::{MediaFile, NewMediaFile, DEFAULT_OWNER_ID};
use crate::uploads::{self, IncomingFile};

/// Multipart field carrying files.
pub const FILES_FIELD: &str = "files";

#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    pub files: Vec<IncomingFile>,
    pub trip_id: Option<u64>,
}

/// Collect the `files` parts and the `trip_id` field of a form.
/// Parts without a content type get an empty one.
pub(crate) async fn read_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            FILES_FIELD => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                form.files.push(IncomingFile {
                    name: file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "trip_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                let text = text.trim();
                if !text.is_empty() {
                    let id = text
                        .parse()
                        .map_err(|_| ApiError::BadRequest(format!("Invalid trip_id: {}", text)))?;
                    form.trip_id = Some(id);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Add the store record of a saved file. The file is removed again when the
/// record cannot be stored.
async fn record_upload(state: &AppState, record: NewMediaFile) -> ApiResult<MediaFile> {
    let path = record.file_path.clone();
    let added = state.store.lock().await.add_media(record);
    match added {
        Ok(media) => Ok(media),
        Err(e) => {
            if let Err(err) = uploads::remove_file(&path).await {
                log_warning(format!("Could not remove {}: {}", path, err));
            }
            Err(e.into())
        }
    }
}

/// `POST /upload/`
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadReceipt>> {
    let form = read_form(multipart).await?;
    if form.files.is_empty() {
        return Err(ApiError::BadRequest("No files provided".into()));
    }

    let mut accepted = Vec::with_capacity(form.files.len());
    for file in form.files.iter().filter(|f| !f.content_type.is_empty()) {
        let kind = uploads::check_content_type(&file.content_type, &state.settings)?;
        accepted.push((file, kind));
    }

    if let Some(trip_id) = form.trip_id {
        let store = state.store.lock().await;
        owned_trip(&store, trip_id, DEFAULT_OWNER_ID)?;
    }

    let mut names = Vec::with_capacity(accepted.len());
    for (file, kind) in accepted {
        let record = uploads::store_original(file, kind, &state.settings, form.trip_id).await?;
        if form.trip_id.is_some() {
            record_upload(&state, record.clone()).await?;
        }
        log_success(format!("Uploaded {} ({} bytes)", record.filename, record.file_size));
        names.push(record.filename);
    }

    Ok(Json(UploadReceipt::new(names)))
}

/// `POST /api/v1/upload/files/`
pub async fn upload_trip_files(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Vec<MediaFile>>> {
    let form = read_form(multipart).await?;
    let trip_id = form
        .trip_id
        .ok_or_else(|| ApiError::BadRequest("trip_id is required".into()))?;
    {
        let store = state.store.lock().await;
        store
            .trip(trip_id)
            .filter(|t| t.owner_id == DEFAULT_OWNER_ID)
            .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    }
    if form.files.is_empty() {
        return Err(ApiError::BadRequest("No files provided".into()));
    }

    let mut checked = Vec::with_capacity(form.files.len());
    for file in &form.files {
        let kind = uploads::check_content_type(&file.content_type, &state.settings)?;
        uploads::check_size(file.size(), state.settings.max_file_size)?;
        checked.push((file, kind));
    }

    let mut saved = Vec::with_capacity(checked.len());
    for (file, kind) in checked {
        let record = uploads::store_unique(file, kind, &state.settings, trip_id).await?;
        let media = record_upload(&state, record).await?;
        log_trip(
            LogLevel::Success,
            trip_id,
            format!("Uploaded {} as {}", media.original_filename, media.filename),
        );
        saved.push(media);
    }

    Ok(Json(saved))
}

/// `GET /api/v1/upload/trips/{id}/files/`
pub async fn trip_files(
    State(state): State<AppState>,
    Path(trip_id): Path<u64>,
) -> ApiResult<Json<Vec<MediaFile>>> {
    let store = state.store.lock().await;
    store
        .trip(trip_id)
        .filter(|t| t.owner_id == DEFAULT_OWNER_ID)
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    let files = store.media_by_trip(trip_id);
    Ok(Json(files))
}

/// `DELETE /api/v1/upload/files/{id}`
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<MessageResponse>> {
    let media = {
        let mut store = state.store.lock().await;
        let media = store
            .media(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("File not found".into()))?;
        let owned = media
            .trip_id
            .and_then(|trip_id| store.trip(trip_id))
            .is_some_and(|t| t.owner_id == DEFAULT_OWNER_ID);
        if !owned {
            return Err(ApiError::BadRequest("Not enough permissions".into()));
        }
        store.remove_media(id)?
    };

    uploads::remove_file(&media.file_path).await?;
    if let Some(trip_id) = media.trip_id {
        log_trip(LogLevel::Info, trip_id, format!("Deleted {}", media.original_filename));
    }

    Ok(Json(MessageResponse::new("File deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::super::server::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tempfile::tempdir;

    async fn create_trip(state: &crate::api::AppState) -> u64 {
        let (_, trip) = send(state, json_request("POST", "/api/v1/trips/", json!({ "title": "Lisbon" }))).await;
        trip["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_upload_saves_under_original_names() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let body = multipart(&[
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
            ("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg"),
        ]);
        let (status, receipt) = send(&state, multipart_request("/upload/", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt, json!({ "uploaded": ["beach.mp4", "sunset.jpg"], "count": 2 }));
        assert_eq!(std::fs::read(state.settings.upload_dir.join("beach.mp4")).unwrap(), b"mp4");
        assert!(state.store.lock().await.media(1).is_none());
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_type_before_saving() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let body = multipart(&[
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
            ("files", Some("cafe.txt"), Some("text/plain"), "menu"),
        ]);
        let (status, body) = send(&state, multipart_request("/upload/", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "File type text/plain not allowed");
        assert!(!state.settings.upload_dir.join("beach.mp4").exists());
    }

    #[tokio::test]
    async fn test_upload_without_files() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let body = multipart(&[("trip_id", None, None, "1")]);
        let (status, body) = send(&state, multipart_request("/upload/", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "No files provided");
    }

    #[tokio::test]
    async fn test_upload_skips_untyped_parts() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let body = multipart(&[
            ("files", Some("blob.bin"), None, "??"),
            ("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg"),
        ]);
        let (status, receipt) = send(&state, multipart_request("/upload/", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["uploaded"], json!(["sunset.jpg"]));
    }

    #[tokio::test]
    async fn test_upload_links_to_trip() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let trip_id = create_trip(&state).await;

        let body = multipart(&[
            ("trip_id", None, None, &trip_id.to_string()),
            ("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg"),
        ]);
        let (status, _) = send(&state, multipart_request("/upload/", body)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, files) = send(&state, empty_request("GET", &format!("/api/v1/upload/trips/{}/files/", trip_id))).await;
        assert_eq!(files[0]["filename"], "sunset.jpg");
        assert_eq!(files[0]["file_type"], "image");

        let body = multipart(&[
            ("trip_id", None, None, "99"),
            ("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg"),
        ]);
        let (status, _) = send(&state, multipart_request("/upload/", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trip_upload_uses_unique_names() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let trip_id = create_trip(&state).await;

        let body = multipart(&[
            ("trip_id", None, None, &trip_id.to_string()),
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
        ]);
        let (status, files) = send(&state, multipart_request("/api/v1/upload/files/", body)).await;

        assert_eq!(status, StatusCode::OK);
        let file = &files[0];
        assert_eq!(file["original_filename"], "beach.mp4");
        assert_ne!(file["filename"], "beach.mp4");
        assert!(file["filename"].as_str().unwrap().ends_with(".mp4"));
        assert_eq!(file["trip_id"], trip_id);
        assert_eq!(file["file_size"], 3);
    }

    #[tokio::test]
    async fn test_trip_upload_enforces_size_limit() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());
        let mut settings = (*state.settings).clone();
        settings.max_file_size = 2;
        state.settings = std::sync::Arc::new(settings);
        let trip_id = create_trip(&state).await;

        let body = multipart(&[
            ("trip_id", None, None, &trip_id.to_string()),
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
        ]);
        let (status, body) = send(&state, multipart_request("/api/v1/upload/files/", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "File size exceeds maximum allowed size of 2 bytes");
    }

    #[tokio::test]
    async fn test_trip_upload_needs_existing_trip() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let body = multipart(&[
            ("trip_id", None, None, "5"),
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
        ]);
        let (status, _) = send(&state, multipart_request("/api/v1/upload/files/", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_file_tolerates_missing_disk_file() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let trip_id = create_trip(&state).await;

        let body = multipart(&[
            ("trip_id", None, None, &trip_id.to_string()),
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
        ]);
        let (_, files) = send(&state, multipart_request("/api/v1/upload/files/", body)).await;
        std::fs::remove_file(files[0]["file_path"].as_str().unwrap()).unwrap();

        let (status, body) = send(&state, empty_request("DELETE", "/api/v1/upload/files/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "File deleted successfully");

        let (status, body) = send(&state, empty_request("DELETE", "/api/v1/upload/files/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "File not found");
    }

    /// State whose store has trip 1 but can no longer be saved.
    fn state_with_broken_store(dir: &std::path::Path) -> crate::api::AppState {
        let path = dir.join("store.json");
        let mut store = crate::store::TripStore::open(&path).unwrap();
        store
            .create_trip(
                crate::models::TripCreate {
                    title: "Lisbon".into(),
                    ..Default::default()
                },
                crate::models::DEFAULT_OWNER_ID,
            )
            .unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let settings = state_in(dir).settings.as_ref().clone();
        crate::api::AppState::new(settings, store)
    }

    fn stored_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir.join("uploads")).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_unrecorded_upload_is_removed() {
        let dir = tempdir().unwrap();
        let state = state_with_broken_store(dir.path());

        let body = multipart(&[
            ("trip_id", None, None, "1"),
            ("files", Some("beach.mp4"), Some("video/mp4"), "mp4"),
        ]);
        let (status, _) = send(&state, multipart_request("/upload/", body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stored_files(dir.path()), 0);

        let body = multipart(&[
            ("trip_id", None, None, "1"),
            ("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg"),
        ]);
        let (status, _) = send(&state, multipart_request("/api/v1/upload/files/", body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_unlinked_upload_has_no_record() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let body = multipart(&[("files", Some("sunset.jpg"), Some("image/jpeg"), "jpeg")]);
        send(&state, multipart_request("/upload/", body)).await;

        let (status, _) = send(&state, empty_request("DELETE", "/api/v1/upload/files/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

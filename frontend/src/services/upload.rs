//! HTTP upload of accepted media files to the backend.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::config::{UPLOAD_FIELD, UPLOAD_PATH};
use crate::state::MediaFile;
use crate::types::{AppError, AppResult, UploadReceipt};

/// Full URL of the upload endpoint for `backend_url`.
pub fn upload_url(backend_url: &str) -> String {
    format!("{}{}", backend_url.trim_end_matches('/'), UPLOAD_PATH)
}

/// Append every file as its own `files` part named after the file.
/// Returns the number of parts written.
pub fn fill_form<F: MediaFile>(
    files: &[F],
    mut append: impl FnMut(&str, &F, &str) -> AppResult<()>,
) -> AppResult<usize> {
    for file in files {
        append(UPLOAD_FIELD, file, &file.name())?;
    }
    Ok(files.len())
}

/// Send one batch of files as `multipart/form-data`, one `files` part each.
pub async fn upload_media(files: Vec<File>, backend_url: &str) -> AppResult<UploadReceipt> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Validation(format!("Failed to create FormData: {:?}", e)))?;

    fill_form(&files, |field, file, name| {
        form_data
            .append_with_blob_and_filename(field, file, name)
            .map_err(|e| AppError::Validation(format!("Failed to append {}: {:?}", name, e)))
    })?;

    let url = upload_url(backend_url);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Upload(format!(
            "Server error ({}): {}",
            response.status(),
            error_text
        )));
    }

    response
        .json::<UploadReceipt>()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to parse response: {}", e)))
}

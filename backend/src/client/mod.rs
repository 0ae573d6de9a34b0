//! Native upload client for `POST /upload/`.
//!
//! Sends local photos and clips the same way the browser does: one
//! multipart request with a repeated `files` field. Only files whose
//! guessed type is `image/*` or `video/*` are sent.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use crate::api::types::UploadReceipt;
use crate::error::ClientError;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMedia {
    pub path: PathBuf,
    pub mime: String,
}

/// Guess a media type from the file extension.
pub fn media_type(path: &Path) -> Option<String> {
    let mime = mime_guess::from_path(path).first()?;
    match mime.type_().as_str() {
        "image" | "video" => Some(mime.essence_str().to_string()),
        _ => None,
    }
}

/// Split `paths` into uploadable media and skipped paths, keeping order.
pub fn select_media(paths: &[PathBuf]) -> (Vec<LocalMedia>, Vec<PathBuf>) {
    let mut media = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match media_type(path) {
            Some(mime) => media.push(LocalMedia { path: path.clone(), mime }),
            None => skipped.push(path.clone()),
        }
    }
    (media, skipped)
}

pub struct UploadClient {
    http: reqwest::Client,
    server: String,
}

impl UploadClient {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            server: server.into(),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload/", self.server.trim_end_matches('/'))
    }

    /// Upload `media` in a single request, optionally linked to a trip.
    pub async fn upload(
        &self,
        media: &[LocalMedia],
        trip_id: Option<u64>,
    ) -> Result<UploadReceipt, ClientError> {
        if media.is_empty() {
            return Err(ClientError::NothingToUpload);
        }

        let mut form = Form::new();
        for item in media {
            let bytes = tokio::fs::read(&item.path).await.map_err(|source| ClientError::Read {
                path: item.path.display().to_string(),
                source,
            })?;
            let name = item
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let part = Part::bytes(bytes).file_name(name).mime_str(&item.mime)?;
            form = form.part("files", part);
        }
        if let Some(id) = trip_id {
            form = form.text("trip_id", id.to_string());
        }

        let response = self.http.post(self.upload_url()).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

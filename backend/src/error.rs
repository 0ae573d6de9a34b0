//! Error types for the Trip Tales backend.
//!
//! - [`ConfigError`] - invalid environment configuration
//! - [`StoreError`] - trip/media repository errors
//! - [`UploadError`] - rejected or failed file uploads
//! - [`JobError`] - generation job start failures
//! - [`ClientError`] - native upload client errors
//! - [`ApiError`] - HTTP-facing errors, rendered as `{"detail": ...}`
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange { key: String, value: u32, min: u32, max: u32 },
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the trip/media repository.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Trip not found: {0}")]
    TripNotFound(u64),

    #[error("File not found: {0}")]
    MediaNotFound(u64),
}

// =============================================================================
// Upload Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File type {0} not allowed")]
    TypeNotAllowed(String),

    #[error("File size exceeds maximum allowed size of {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("Failed to save file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Job Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Trip not found")]
    TripNotFound,

    #[error("No media files found for this trip")]
    NoMedia,

    #[error("Video generation already in progress for trip {0}")]
    AlreadyProcessing(u64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Client Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No video or image files to upload")]
    NothingToUpload,
}

// =============================================================================
// API Errors
// =============================================================================

/// HTTP-facing errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TripNotFound(_) => ApiError::NotFound("Trip not found".into()),
            StoreError::MediaNotFound(_) => ApiError::NotFound("File not found".into()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(_) => ApiError::Internal(err.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::TripNotFound => ApiError::NotFound(err.to_string()),
            JobError::NoMedia => ApiError::BadRequest(err.to_string()),
            JobError::AlreadyProcessing(_) => ApiError::Conflict(err.to_string()),
            JobError::Store(inner) => inner.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type StoreResult<T> = Result<T, StoreError>;

pub type UploadResult<T> = Result<T, UploadError>;

pub type ApiResult<T> = Result<T, ApiError>;

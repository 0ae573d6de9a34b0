//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Media Types** - kinds of accepted files
//! - **Generation Types** - request/result of a story generation
//! - **API Types** - Backend response structures
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ACCEPTED_MIME_PREFIXES;

// =============================================================================
// Media Types
// =============================================================================

/// Kind of an accepted media file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// Classify a MIME type. Anything that is neither `video/*` nor
    /// `image/*` yields `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let [video, image] = ACCEPTED_MIME_PREFIXES;
        if mime.starts_with(video) {
            Some(MediaKind::Video)
        } else if mime.starts_with(image) {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

// =============================================================================
// Generation Types
// =============================================================================

/// What the user asked for: free text plus an optional preset label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Empty when no preset was chosen.
    pub style: String,
}

/// The single most recent generation output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    pub video_url: String,
    pub prompt: String,
    pub style: String,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the backend `/upload/` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Names of the files the server stored
    pub uploaded: Vec<String>,
    pub count: usize,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Server rejected the upload.
    Upload(String),
    /// Network/HTTP error.
    Network(String),
    /// Invalid data format.
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("video/quicktime"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("text/plain"), None);
        assert_eq!(MediaKind::from_mime(""), None);
        // Prefix match only, no sniffing
        assert_eq!(MediaKind::from_mime("application/video"), None);
    }

    #[test]
    fn test_receipt_deserialization() {
        let json = r#"{"uploaded": ["beach.mp4", "sunset.jpg"], "count": 2}"#;
        let receipt: UploadReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.count, 2);
        assert_eq!(receipt.uploaded[0], "beach.mp4");
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Upload("Server error (400): bad type".into());
        assert!(err.to_string().starts_with("Upload error"));
    }
}

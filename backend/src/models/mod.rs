//! Domain models for trips and their media.
//!
//! - [`Trip`] - a travel story with its prompt, style and generation status
//! - [`TripStatus`] - draft → processing → completed/failed
//! - [`MediaFile`] - an uploaded photo or clip
//! - [`MediaKind`] - image or video, derived from the MIME type
//! - [`TripCreate`] / [`TripUpdate`] - request payloads
//! - [`TripView`] - a trip with its media attached

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner used for every request; the API has no authentication.
pub const DEFAULT_OWNER_ID: u64 = 1;

// =============================================================================
// Media
// =============================================================================

/// Kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `video/*` is a video, `image/*` an image, anything else neither.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// A stored media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: u64,
    /// Name on disk
    pub filename: String,
    /// Name as uploaded
    pub original_filename: String,
    pub file_path: String,
    pub file_size: u64,
    pub mime_type: String,
    pub file_type: MediaKind,
    pub trip_id: Option<u64>,
    pub uploaded_at: DateTime<Utc>,
}

/// A media record before the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaFile {
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_size: u64,
    pub mime_type: String,
    pub file_type: MediaKind,
    pub trip_id: Option<u64>,
}

// =============================================================================
// Trips
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Draft,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub prompt: Option<String>,
    pub style: Option<String>,
    pub status: TripStatus,
    pub generated_video_url: Option<String>,
    pub owner_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Apply the fields present in `update`.
    pub fn apply(&mut self, update: TripUpdate) {
        let TripUpdate {
            title,
            description,
            destination,
            prompt,
            style,
            status,
            generated_video_url,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if destination.is_some() {
            self.destination = destination;
        }
        if prompt.is_some() {
            self.prompt = prompt;
        }
        if style.is_some() {
            self.style = style;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if generated_video_url.is_some() {
            self.generated_video_url = generated_video_url;
        }
        self.updated_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default)]
    pub generated_video_url: Option<String>,
}

/// A trip as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripView {
    #[serde(flatten)]
    pub trip: Trip,
    pub media_files: Vec<MediaFile>,
}

//! Application configuration.
//!
//! Centralized configuration for the Trip Tales frontend.
//! The backend address is fixed; there is no runtime configuration.

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Path of the multipart upload endpoint on the backend.
pub const UPLOAD_PATH: &str = "/upload/";

/// Multipart field name, repeated once per file.
pub const UPLOAD_FIELD: &str = "files";

/// MIME prefixes accepted by the intake surface.
pub const ACCEPTED_MIME_PREFIXES: [&str; 2] = ["video/", "image/"];

/// Stand-in result of every generation.
pub const SAMPLE_VIDEO_URL: &str =
    "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_2mb.mp4";

/// How long the generation placeholder stays busy (in milliseconds).
pub const GENERATION_DELAY_MS: u32 = 8_000;

/// Length of generated media item identifiers.
pub const MEDIA_ID_LEN: usize = 9;

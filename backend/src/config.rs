//! Server configuration.
//!
//! Every setting has a default and can be overridden from the environment
//! (a `.env` file in the working directory is read first).
//!
//! | Variable                | Default                  |
//! |-------------------------|--------------------------|
//! | `TRIP_TALES_HOST`       | `0.0.0.0`                |
//! | `TRIP_TALES_PORT`       | `8000`                   |
//! | `UPLOAD_DIR`            | `uploads`                |
//! | `DATA_FILE`             | `.trip-tales/store.json` |
//! | `MAX_FILE_SIZE`         | 50 MB                    |
//! | `MAX_REQUEST_SIZE`      | 500 MB                   |
//! | `ALLOWED_FILE_TYPES`    | jpeg/png/gif, mp4/mov/avi |
//! | `BACKEND_CORS_ORIGINS`  | localhost:3000/5173      |
//! | `GENERATION_DELAY_SECS` | `10`                     |
//! | `VIDEO_FPS`             | `30`                     |
//! | `VIDEO_WIDTH`/`HEIGHT`  | `1920`/`1080`            |
//! | `PHOTO_DURATION`        | `1`                      |
//! | `TRANSITION_FRAMES`     | `15`                     |
//! | `CLIP_MAX_DURATION`     | `5`                      |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ALLOWED_FILE_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
];

pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Rendering parameters for story videos.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSettings {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Seconds each photo stays on screen
    pub photo_duration: u32,
    /// Frames spent fading a photo in (and out)
    pub transition_frames: u32,
    /// Clips are cut after this many seconds
    pub clip_max_duration: u32,
}

impl VideoSettings {
    /// Reject values that would make a storyboard meaningless or huge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value, min, max) in [
            ("VIDEO_FPS", self.fps, 1, 240),
            ("VIDEO_WIDTH", self.width, 1, 8192),
            ("VIDEO_HEIGHT", self.height, 1, 8192),
            ("PHOTO_DURATION", self.photo_duration, 0, 600),
            ("TRANSITION_FRAMES", self.transition_frames, 0, 1000),
            ("CLIP_MAX_DURATION", self.clip_max_duration, 0, 600),
        ] {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    key: key.to_string(),
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1920,
            height: 1080,
            photo_duration: 1,
            transition_frames: 15,
            clip_max_duration: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub data_file: PathBuf,
    pub max_file_size: usize,
    pub max_request_size: usize,
    pub allowed_file_types: Vec<String>,
    pub cors_origins: Vec<String>,
    pub generation_delay: Duration,
    pub video: VideoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: PathBuf::from("uploads"),
            data_file: PathBuf::from(".trip-tales/store.json"),
            max_file_size: 50 * 1024 * 1024,
            max_request_size: 500 * 1024 * 1024,
            allowed_file_types: DEFAULT_ALLOWED_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            generation_delay: Duration::from_secs(10),
            video: VideoSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("TRIP_TALES_HOST") {
            settings.host = host;
        }
        if let Some(port) = get("TRIP_TALES_PORT") {
            settings.port = parse("TRIP_TALES_PORT", &port)?;
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            settings.upload_dir = PathBuf::from(dir);
        }
        if let Some(file) = get("DATA_FILE") {
            settings.data_file = PathBuf::from(file);
        }
        if let Some(size) = get("MAX_FILE_SIZE") {
            settings.max_file_size = parse("MAX_FILE_SIZE", &size)?;
        }
        if let Some(size) = get("MAX_REQUEST_SIZE") {
            settings.max_request_size = parse("MAX_REQUEST_SIZE", &size)?;
        }
        if let Some(types) = get("ALLOWED_FILE_TYPES") {
            settings.allowed_file_types = split_list(&types);
        }
        if let Some(origins) = get("BACKEND_CORS_ORIGINS") {
            settings.cors_origins = split_list(&origins);
        }
        if let Some(secs) = get("GENERATION_DELAY_SECS") {
            settings.generation_delay = Duration::from_secs(parse("GENERATION_DELAY_SECS", &secs)?);
        }

        let video = &mut settings.video;
        for (key, slot) in [
            ("VIDEO_FPS", &mut video.fps),
            ("VIDEO_WIDTH", &mut video.width),
            ("VIDEO_HEIGHT", &mut video.height),
            ("PHOTO_DURATION", &mut video.photo_duration),
            ("TRANSITION_FRAMES", &mut video.transition_frames),
            ("CLIP_MAX_DURATION", &mut video.clip_max_duration),
        ] {
            if let Some(value) = get(key) {
                *slot = parse(key, &value)?;
            }
        }
        settings.video.validate()?;

        Ok(settings)
    }

    /// Address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_allowed_type(&self, mime: &str) -> bool {
        self.allowed_file_types.iter().any(|t| t.eq_ignore_ascii_case(mime))
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

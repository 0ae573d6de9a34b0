//! # Trip Tales - turn travel photos and clips into short video stories
//!
//! The backend behind the Trip Tales web client: it accepts media uploads,
//! keeps trips and their files, and runs the (placeholder) generation jobs
//! that turn a trip into a story video.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Browser   │────▶│   Uploads   │────▶│ Trip Store  │────▶│  Generation │
//! │  multipart  │     │ (validate)  │     │   (JSON)    │     │    job      │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                    │
//!                                              storyboard + style ◀──┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trip_tales::{server, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     server::start_server(Settings::from_env().unwrap()).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Environment settings
//! - [`error`] - Hierarchical error types
//! - [`models`] - Trips and media files
//! - [`store`] - JSON-file trip repository
//! - [`uploads`] - Upload validation and storage
//! - [`styles`] - Render styles and their grading
//! - [`storyboard`] - Frame plan of a story video
//! - [`jobs`] - Background video generation
//! - [`client`] - Native upload client
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Persistence
pub mod store;
pub mod uploads;

// Story generation
pub mod jobs;
pub mod storyboard;
pub mod styles;

// Clients
pub mod client;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors and configuration
// =============================================================================

pub use config::{Settings, VideoSettings};
pub use error::{ApiError, ClientError, ConfigError, JobError, StoreError, UploadError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{MediaFile, MediaKind, Trip, TripCreate, TripStatus, TripUpdate, TripView};

// =============================================================================
// Re-exports - Store and jobs
// =============================================================================

pub use jobs::{generated_video_url, GenerationRequest, GenerationRunner};
pub use store::{SharedStore, TripStore};

// =============================================================================
// Re-exports - Storyboard
// =============================================================================

pub use storyboard::{build as build_storyboard, Segment, StoryMedia, StoryOptions, Storyboard};
pub use styles::{RenderStyle, ALL_STYLES};

// =============================================================================
// Re-exports - Client and API
// =============================================================================

pub use api::types::UploadReceipt;
pub use client::{select_media, UploadClient};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, AppState};
}

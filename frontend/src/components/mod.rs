//! UI Components for the Trip Tales application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadZone`] - Media intake with drag & drop and thumbnails
//! - [`PromptInput`] - Prompt text and quick style presets
//! - [`VideoPreview`] - Busy / finished / idle result panel

mod hero;
mod upload;
mod prompt;
mod preview;
mod footer;

pub use hero::*;
pub use upload::*;
pub use prompt::*;
pub use preview::*;
pub use footer::*;

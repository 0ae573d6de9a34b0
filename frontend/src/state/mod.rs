//! UI state containers, independent of rendering.
//!
//! - [`intake`] - accepted file list with previews
//! - [`prompt`] - prompt text and preset styles
//! - [`story`] - generation lifecycle
//! - [`viewer`] - result panel state

pub mod intake;
pub mod prompt;
pub mod story;
pub mod viewer;

pub use intake::*;
pub use prompt::*;
pub use story::*;
pub use viewer::*;

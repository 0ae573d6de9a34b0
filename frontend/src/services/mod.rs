//! Backend services.
//!
//! - [`upload`] - multipart media upload to the Trip Tales backend

pub mod upload;

pub use upload::*;

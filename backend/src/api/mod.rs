//! HTTP API module.
//!
//! Router, handlers and wire types of the Trip Tales backend.

pub mod ai;
pub mod logs;
pub mod media;
pub mod server;
pub mod trips;
pub mod types;

pub use logs::*;
pub use server::{router, start_server, AppState};
pub use types::*;

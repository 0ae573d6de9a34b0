//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

/// Result of `POST /upload/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Saved filenames in request order
    pub uploaded: Vec<String>,
    pub count: usize,
}

impl UploadReceipt {
    pub fn new(uploaded: Vec<String>) -> Self {
        let count = uploaded.len();
        Self { uploaded, count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `?skip=&limit=` of list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: default_limit() }
    }
}

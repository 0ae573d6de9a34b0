//! Page-level generation state and the placeholder generator.
//!
//! ```text
//! Idle ──submit──▶ Generating ──delay elapsed──▶ Result
//!   ▲                                              │
//!   └────────────── (next submit) ◀────────────────┘
//! ```

use gloo_timers::future::TimeoutFuture;

use crate::config::SAMPLE_VIDEO_URL;
use crate::state::viewer::PreviewState;
use crate::types::{GenerationRequest, GenerationResult};

/// Identifies one generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationTicket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoryState {
    is_processing: bool,
    prompt: String,
    style: String,
    video_url: Option<String>,
    issued: u64,
}

impl StoryState {
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Enter the busy state for `request`, dropping any previous result.
    ///
    /// Returns `None` while another generation is pending.
    pub fn begin(&mut self, request: &GenerationRequest) -> Option<GenerationTicket> {
        if self.is_processing {
            return None;
        }
        self.issued += 1;
        self.is_processing = true;
        self.prompt = request.prompt.clone();
        self.style = request.style.clone();
        self.video_url = None;
        Some(GenerationTicket(self.issued))
    }

    /// Leave the busy state with `video_url`. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: GenerationTicket, video_url: impl Into<String>) -> bool {
        if !self.is_processing || ticket.0 != self.issued {
            return false;
        }
        self.is_processing = false;
        self.video_url = Some(video_url.into());
        true
    }

    pub fn result(&self) -> Option<GenerationResult> {
        if self.is_processing {
            return None;
        }
        self.video_url.as_ref().map(|url| GenerationResult {
            video_url: url.clone(),
            prompt: self.prompt.clone(),
            style: self.style.clone(),
        })
    }

    pub fn preview(&self) -> PreviewState {
        PreviewState::from_parts(
            self.is_processing,
            self.video_url.as_deref().unwrap_or_default(),
            &self.prompt,
            &self.style,
        )
    }
}

/// Stand-in generator: waits `delay_ms`, then yields the sample video.
pub async fn run_placeholder(delay_ms: u32) -> String {
    TimeoutFuture::new(delay_ms).await;
    SAMPLE_VIDEO_URL.to_string()
}

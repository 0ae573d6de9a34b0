//! Storyboard - the frame plan of a story video.
//!
//! A story is an optional title card, one segment per media file in upload
//! order, and an optional closing card:
//!
//! ```text
//! [ title 3s ] [ photo 1/n ] [ clip ≤5s ] [ photo 3/n ] ... [ outro 2s ]
//! ```
//!
//! Photos and title cards fade in over the first `transition_frames` frames
//! and out over the last ones. Clips play unfaded and are cut at
//! `clip_max_duration` seconds.

use serde::Serialize;

use crate::api::logs::log_warning;
use crate::config::VideoSettings;
use crate::models::MediaFile;
use crate::styles::{Grading, RenderStyle};

pub const INTRO_SECONDS: u32 = 3;
pub const OUTRO_SECONDS: u32 = 2;
pub const OUTRO_TEXT: &str = "Thank you for watching!";

/// One media item to place in the story.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryMedia {
    pub path: String,
    pub filename: String,
    /// `image` or `video`; other values are skipped
    pub kind: String,
}

impl From<&MediaFile> for StoryMedia {
    fn from(media: &MediaFile) -> Self {
        Self {
            path: media.file_path.clone(),
            filename: media.original_filename.clone(),
            kind: media.file_type.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoryOptions {
    pub title: Option<String>,
    pub style: Option<String>,
    pub intro: bool,
    pub outro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Title {
        text: String,
        frames: u32,
        transition_frames: u32,
    },
    Photo {
        path: String,
        caption: String,
        frames: u32,
        transition_frames: u32,
    },
    /// A clip contributes at most `max_frames`; shorter sources end early.
    Clip { path: String, max_frames: u32 },
}

impl Segment {
    /// Planned frame count (upper bound for clips).
    pub fn frames(&self) -> u32 {
        match self {
            Segment::Title { frames, .. } | Segment::Photo { frames, .. } => *frames,
            Segment::Clip { max_frames, .. } => *max_frames,
        }
    }

    /// Brightness multiplier of frame `i` within the segment.
    pub fn alpha(&self, i: u32) -> f32 {
        match self {
            Segment::Title { frames, transition_frames, .. }
            | Segment::Photo { frames, transition_frames, .. } => {
                fade_alpha(i, *frames, *transition_frames)
            }
            Segment::Clip { .. } => 1.0,
        }
    }
}

/// Fade in over the first `transition` frames, out over the last ones.
pub fn fade_alpha(i: u32, total: u32, transition: u32) -> f32 {
    if transition == 0 {
        return 1.0;
    }
    if i < transition {
        i as f32 / transition as f32
    } else if total.saturating_sub(i) < transition {
        total.saturating_sub(i) as f32 / transition as f32
    } else {
        1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Storyboard {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub style: Option<RenderStyle>,
    /// Grading of `style`; `None` renders ungraded
    pub grading: Option<Grading>,
    pub segments: Vec<Segment>,
}

impl Storyboard {
    pub fn total_frames(&self) -> u32 {
        self.segments.iter().map(Segment::frames).fold(0, u32::saturating_add)
    }

    /// Length in seconds at the board's frame rate.
    pub fn duration(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.total_frames() as f64 / self.fps as f64
    }
}

/// Plan a story video from `media`.
pub fn build(media: &[StoryMedia], options: &StoryOptions, video: &VideoSettings) -> Storyboard {
    let fps = video.fps;
    let transition = video.transition_frames;
    let mut segments = Vec::with_capacity(media.len() + 2);

    if options.intro {
        if let Some(title) = options.title.as_deref().filter(|t| !t.trim().is_empty()) {
            segments.push(Segment::Title {
                text: title.to_string(),
                frames: INTRO_SECONDS.saturating_mul(fps),
                transition_frames: transition,
            });
        }
    }

    let count = media.len();
    for (idx, item) in media.iter().enumerate() {
        match item.kind.as_str() {
            "image" => segments.push(Segment::Photo {
                path: item.path.clone(),
                caption: format!("{}/{}", idx + 1, count),
                frames: video.photo_duration.saturating_mul(fps),
                transition_frames: transition,
            }),
            "video" => segments.push(Segment::Clip {
                path: item.path.clone(),
                max_frames: video.clip_max_duration.saturating_mul(fps),
            }),
            other => log_warning(format!("Unknown media type {} for {}", other, item.filename)),
        }
    }

    if options.outro {
        segments.push(Segment::Title {
            text: OUTRO_TEXT.to_string(),
            frames: OUTRO_SECONDS.saturating_mul(fps),
            transition_frames: transition,
        });
    }

    let style = options.style.as_deref().and_then(RenderStyle::lookup);
    Storyboard {
        fps,
        width: video.width,
        height: video.height,
        style,
        grading: style.map(|s| s.grading()),
        segments,
    }
}

//! What the result panel shows.

/// Three mutually exclusive panel states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewState {
    /// A generation is pending.
    Busy,
    /// A finished video.
    Ready {
        video_url: String,
        /// Shown only when non-empty
        prompt: Option<String>,
        /// Preset label badge, absent when no preset was chosen
        style_badge: Option<String>,
    },
    /// Nothing generated yet.
    Idle,
}

impl PreviewState {
    /// `is_processing` wins over an existing URL; an empty URL means idle.
    pub fn from_parts(is_processing: bool, video_url: &str, prompt: &str, style: &str) -> Self {
        if is_processing {
            return PreviewState::Busy;
        }
        if video_url.is_empty() {
            return PreviewState::Idle;
        }
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PreviewState::Ready {
            video_url: video_url.to_string(),
            prompt: non_empty(prompt),
            style_badge: non_empty(style),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, PreviewState::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_takes_precedence() {
        assert_eq!(PreviewState::from_parts(true, "https://x/v.mp4", "p", "s"), PreviewState::Busy);
        assert!(PreviewState::from_parts(true, "", "", "").is_busy());
    }

    #[test]
    fn test_empty_url_is_idle() {
        assert_eq!(PreviewState::from_parts(false, "", "prompt", "style"), PreviewState::Idle);
    }

    #[test]
    fn test_ready_with_badge() {
        let state = PreviewState::from_parts(false, "https://x/v.mp4", "Dreamy", "Memory Lane");
        assert_eq!(
            state,
            PreviewState::Ready {
                video_url: "https://x/v.mp4".into(),
                prompt: Some("Dreamy".into()),
                style_badge: Some("Memory Lane".into()),
            }
        );
    }
}

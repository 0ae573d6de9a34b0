//! Prompt text and preset style selection.

use crate::types::GenerationRequest;

/// A one-click shortcut: a label plus its canned prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetStyle {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub static PRESET_STYLES: [PresetStyle; 4] = [
    PresetStyle {
        label: "Cinematic Travel",
        prompt: "Create a cinematic 2-minute highlight reel with smooth transitions and epic travel moments",
    },
    PresetStyle {
        label: "Instagram Reel",
        prompt: "Make a fun 60-second Instagram reel with upbeat energy and trendy cuts",
    },
    PresetStyle {
        label: "Memory Lane",
        prompt: "Create a nostalgic storytelling video focusing on emotional moments and connections",
    },
    PresetStyle {
        label: "Music Video",
        prompt: "Generate a rhythmic video synchronized with background music and dynamic cuts",
    },
];

/// Look up a preset by its label.
pub fn preset(label: &str) -> Option<&'static PresetStyle> {
    PRESET_STYLES.iter().find(|p| p.label == label)
}

/// Free text plus the label of the last chosen preset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptState {
    text: String,
    selected_label: String,
}

impl PromptState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub fn is_selected(&self, label: &str) -> bool {
        !self.selected_label.is_empty() && self.selected_label == label
    }

    /// Overwrite the text with the preset's prompt and record its label.
    pub fn select_preset(&mut self, preset: &PresetStyle) {
        self.text = preset.prompt.to_string();
        self.selected_label = preset.label.to_string();
    }

    /// Direct edit. The selected label is left as is.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn can_submit(&self, is_processing: bool) -> bool {
        !is_processing && !self.text.trim().is_empty()
    }

    /// The request to forward, or `None` when submission is disabled.
    pub fn submit(&self, is_processing: bool) -> Option<GenerationRequest> {
        self.can_submit(is_processing).then(|| GenerationRequest {
            prompt: self.text.clone(),
            style: self.selected_label.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_preset_sets_exact_text_and_label() {
        for p in PRESET_STYLES.iter() {
            let mut state = PromptState::default();
            state.set_text("something else");
            state.select_preset(p);
            assert_eq!(state.text(), p.prompt);
            assert_eq!(state.selected_label(), p.label);
            assert!(state.is_selected(p.label));
        }
    }

    #[test]
    fn test_blank_text_cannot_submit() {
        let mut state = PromptState::default();
        assert!(state.submit(false).is_none());

        state.set_text("   \n\t ");
        assert!(!state.can_submit(false));
        assert!(state.submit(false).is_none());
    }

    #[test]
    fn test_no_submit_while_processing() {
        let mut state = PromptState::default();
        state.set_text("Make it dreamy");
        assert!(state.can_submit(false));
        assert!(!state.can_submit(true));
        assert!(state.submit(true).is_none());
    }

    #[test]
    fn test_submit_forwards_verbatim() {
        let mut state = PromptState::default();
        state.set_text("  Make it dreamy ");
        let request = state.submit(false).unwrap();
        assert_eq!(request.prompt, "  Make it dreamy ");
        assert_eq!(request.style, "");
    }

    #[test]
    fn test_edit_keeps_selected_label() {
        let mut state = PromptState::default();
        state.select_preset(preset("Memory Lane").unwrap());
        state.set_text("Just the sunsets");

        let request = state.submit(false).unwrap();
        assert_eq!(request.prompt, "Just the sunsets");
        assert_eq!(request.style, "Memory Lane");
    }

    #[test]
    fn test_preset_lookup() {
        assert!(preset("Music Video").is_some());
        assert!(preset("music video").is_none());
    }
}

//! Prompt input with quick style presets.

use leptos::*;

use crate::state::{PromptState, PRESET_STYLES};
use crate::types::GenerationRequest;

#[component]
pub fn PromptInput(
    #[prop(into)] is_processing: Signal<bool>,
    #[prop(into)] on_generate: Callback<GenerationRequest>,
) -> impl IntoView {
    let (prompt, set_prompt) = create_signal(PromptState::default());

    let on_submit = move |_| {
        match prompt.with_untracked(|p| p.submit(is_processing.get_untracked())) {
            Some(request) => on_generate.call(request),
            None => log::debug!("Generate ignored: empty prompt or already processing"),
        }
    };

    view! {
        <div class="prompt-card">
            <div class="prompt-header">
                <h3>"Tell your story"</h3>
                <p class="subtitle">"Describe the style and mood you want for your video story"</p>
            </div>

            <label class="field-label">"Quick Styles"</label>
            <div class="style-grid">
                {PRESET_STYLES
                    .iter()
                    .map(|preset| {
                        let label = preset.label;
                        view! {
                            <button
                                class="style-button"
                                class:selected=move || prompt.with(|p| p.is_selected(label))
                                on:click=move |_| set_prompt.update(|p| p.select_preset(preset))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <label for="custom-prompt" class="field-label">"Custom Prompt"</label>
            <textarea
                id="custom-prompt"
                class="prompt-text"
                placeholder="e.g., Create a 2-minute cinematic highlight of my Paris trip with romantic sunset moments and cafe scenes..."
                prop:value=move || prompt.with(|p| p.text().to_string())
                on:input=move |ev| set_prompt.update(|p| p.set_text(event_target_value(&ev)))
            ></textarea>

            <button
                class="btn btn-primary generate-button"
                disabled=move || !prompt.with(|p| p.can_submit(is_processing.get()))
                on:click=on_submit
            >
                {move || if is_processing.get() {
                    "⏳ Creating your story..."
                } else {
                    "✨ Generate Video Story"
                }}
            </button>
        </div>
    }
}

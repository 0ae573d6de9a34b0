//! Result panel: busy spinner, finished video, or empty placeholder.

use leptos::*;

use crate::state::PreviewState;

fn share_link(video_url: &str) -> String {
    format!("mailto:?subject=My%20trip%20story&body={}", video_url)
}

#[component]
pub fn VideoPreview(#[prop(into)] state: Signal<PreviewState>) -> impl IntoView {
    let (is_playing, set_is_playing) = create_signal(false);

    move || match state.get() {
        PreviewState::Busy => view! {
            <div class="preview-card processing">
                <div class="spinner"></div>
                <h3>"Crafting your story..."</h3>
                <p class="subtitle">
                    "Analyzing your content, selecting the best moments, and weaving them into a video story."
                </p>
                <div class="progress-steps">
                    "• Analyzing content • Selecting highlights • Adding magic"
                </div>
            </div>
        }
        .into_view(),

        PreviewState::Ready { video_url, prompt, style_badge } => {
            let share = share_link(&video_url);
            view! {
                <div class="preview-card ready">
                    <div class="video-frame">
                        <video
                            controls=true
                            on:play=move |_| set_is_playing.set(true)
                            on:pause=move |_| set_is_playing.set(false)
                        >
                            <source src=video_url.clone() type="video/mp4"/>
                            "Your browser does not support the video tag."
                        </video>
                        <Show
                            when=move || !is_playing.get()
                            fallback=|| view! { }
                        >
                            <div class="play-overlay">"▶ Play Story"</div>
                        </Show>
                    </div>

                    <div class="preview-details">
                        <h3>"Your Video Story"</h3>
                        {style_badge.map(|style| view! { <span class="badge">{style}</span> })}
                        {prompt.map(|text| view! { <p class="prompt-echo">{text}</p> })}
                        <div class="video-actions">
                            <a class="btn btn-primary" href=video_url download="trip-story.mp4">
                                "⬇ Download"
                            </a>
                            <a class="btn btn-secondary" href=share>"🔗 Share"</a>
                        </div>
                    </div>
                </div>
            }
            .into_view()
        }

        PreviewState::Idle => view! {
            <div class="preview-card idle">
                <div class="idle-icon">"▶"</div>
                <h3>"Ready to create magic?"</h3>
                <p class="subtitle">"Upload your content and describe your vision to get started"</p>
            </div>
        }
        .into_view(),
    }
}

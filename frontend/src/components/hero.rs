//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"🎬 Trip Story AI"</h1>
            <p class="subtitle">
                "Transform your travel memories into cinematic stories with the power of AI"
            </p>
            <div class="hero-features">
                <span>"✨ AI-Powered Editing"</span>
                <span>"🪄 Custom Storytelling"</span>
                <span>"🎥 Professional Quality"</span>
            </div>
        </div>
    }
}

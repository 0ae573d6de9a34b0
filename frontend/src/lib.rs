//! Trip Tales - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for staging travel photos and clips, describing
//! the wanted story, and previewing the generated video.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, description)                                   │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │  UploadZone   (1. upload)    │  VideoPreview (3. result)    │
//! │  PromptInput  (2. describe)  │                              │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uploading and generating run independently: a new batch of files is
//! posted to the backend as soon as it is accepted, while "Generate"
//! drives the placeholder generator. Neither waits for the other.
//!
//! # Modules
//!
//! - [`types`] - Common types (MediaKind, GenerationRequest, etc.)
//! - [`state`] - UI state containers (intake, prompt, story, viewer)
//! - [`components`] - UI components (UploadZone, PromptInput, VideoPreview, etc.)
//! - [`services`] - Backend communication (upload)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Media
    MediaKind,
    // Generation
    GenerationRequest, GenerationResult,
    // API
    UploadReceipt,
    // Errors
    AppError, AppResult,
};

// State
pub use state::*;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Trip Story AI"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for the page
    let (media, set_media) = create_signal(MediaList::<File>::new());
    let (story, set_story) = create_signal(StoryState::default());

    // New batch: stage it, then post it in the background
    let on_files = move |batch: Vec<UploadedMediaItem<File>>| {
        let files: Vec<File> = batch.iter().map(|item| item.file.clone()).collect();
        set_media.update(|list| list.extend(batch));

        spawn_local(async move {
            match upload_media(files, BACKEND_URL).await {
                Ok(receipt) => {
                    log::info!("📤 Uploaded successfully: {} file(s) {:?}", receipt.count, receipt.uploaded);
                }
                Err(e) => {
                    log::error!("❌ Upload failed: {}", e);
                }
            }
        });
    };

    let on_remove = move |id: String| {
        set_media.update(|list| {
            if !list.remove(&id) {
                log::warn!("⚠️ No staged file with id {}", id);
            }
        });
    };

    let on_generate = move |request: GenerationRequest| {
        let mut ticket = None;
        set_story.update(|story| ticket = story.begin(&request));

        let Some(ticket) = ticket else {
            log::warn!("⚠️ A story is already being generated");
            return;
        };

        log::info!("🎬 Generating story: {:?} ({})", request.prompt, request.style);
        spawn_local(async move {
            let video_url = run_placeholder(GENERATION_DELAY_MS).await;
            set_story.update(|story| {
                story.complete(ticket, video_url);
            });
        });
    };

    let is_processing = Signal::derive(move || story.with(|s| s.is_processing()));
    let preview = Signal::derive(move || story.with(|s| s.preview()));

    view! {
        <div class="container">
            <Hero/>

            <div class="columns">
                <div class="column">
                    <section>
                        <h2><span class="step">"1"</span>"Upload Your Content"</h2>
                        <UploadZone media=media on_files=on_files on_remove=on_remove/>
                    </section>

                    <section>
                        <h2><span class="step">"2"</span>"Describe Your Vision"</h2>
                        <PromptInput is_processing=is_processing on_generate=on_generate/>
                    </section>
                </div>

                <div class="column">
                    <section class="sticky">
                        <h2><span class="step">"3"</span>"Your Story Awaits"</h2>
                        <VideoPreview state=preview/>
                    </section>
                </div>
            </div>
        </div>

        <Footer/>
    }
}

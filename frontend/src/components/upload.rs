//! Media upload zone with drag & drop support.
//!
//! Filters dropped or picked files, stages the accepted ones and shows
//! them as removable thumbnails.

use leptos::*;
use std::rc::Rc;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

use crate::state::{accept_files, BrowserPreviews, MediaList, RandomIds, UploadedMediaItem};
use crate::types::MediaKind;

fn files_of(list: Option<FileList>) -> Vec<File> {
    list.map(|files| (0..files.length()).filter_map(|i| files.get(i)).collect())
        .unwrap_or_default()
}

#[component]
pub fn UploadZone(
    media: ReadSignal<MediaList<File>>,
    /// Receives each newly accepted batch
    #[prop(into)] on_files: Callback<Vec<UploadedMediaItem<File>>>,
    /// Receives the id of an item to drop
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let (is_drag_over, set_is_drag_over) = create_signal(false);

    let process_files = move |files: Vec<File>| {
        let previews = Rc::new(BrowserPreviews);
        let batch = media.with_untracked(|list| accept_files(files, list, &mut RandomIds, &previews));
        if batch.is_empty() {
            log::debug!("No video or image files in selection");
            return;
        }
        on_files.call(batch);
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_drag_over.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_drag_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_drag_over.set(false);
        process_files(files_of(ev.data_transfer().and_then(|dt| dt.files())));
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        process_files(files_of(input.files()));
        // Allow picking the same file again
        input.set_value("");
    };

    view! {
        <div class="upload-card">
            <div
                class="upload-section"
                class:drag-over=move || is_drag_over.get()
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <input
                    type="file"
                    id="fileInput"
                    class="upload-input"
                    multiple=true
                    accept="video/*,image/*"
                    on:change=on_file_change
                />
                <div class="upload-icon">"📤"</div>
                <div class="upload-text">"Drop your travel memories here"</div>
                <div class="upload-hint">
                    "Upload videos and images from your trip. Supports MP4, MOV, JPG, PNG"
                </div>
                <label for="fileInput" class="upload-button">"Choose Files"</label>
            </div>

            <Show
                when=move || media.with(|list| !list.is_empty())
                fallback=|| view! { }
            >
                <div class="uploaded-files">
                    <h4>"🎞️ Uploaded Files (" {move || media.with(|list| list.len())} ")"</h4>
                    <div class="file-grid">
                        <For
                            each=move || media.with(|list| list.items().to_vec())
                            key=|item| item.id.clone()
                            children=move |item| {
                                let id = item.id.clone();
                                let name = item.name();
                                let thumbnail = match (item.kind, item.preview.as_ref()) {
                                    (MediaKind::Image, Some(preview)) => view! {
                                        <img class="thumb" src=preview.as_str().to_string() alt=name.clone()/>
                                    }.into_view(),
                                    _ => view! {
                                        <div class="thumb video-thumb">"🎬"</div>
                                    }.into_view(),
                                };

                                view! {
                                    <div class="file-card">
                                        {thumbnail}
                                        <button
                                            class="remove-file"
                                            title="Remove"
                                            on:click=move |_| on_remove.call(id.clone())
                                        >
                                            "✕"
                                        </button>
                                        <p class="file-name">{name}</p>
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}

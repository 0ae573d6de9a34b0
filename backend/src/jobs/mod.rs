//! Video generation jobs.
//!
//! Starting a job validates the trip, marks it `processing` and returns
//! immediately; the work itself runs on a tokio task that plans the story,
//! waits out the configured generation delay and then publishes the
//! placeholder video URL.
//!
//! ```text
//! draft ──start──▶ processing ──done──▶ completed
//!                       └──store error or panic──▶ failed
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::api::logs::{log_trip, LogLevel};
use crate::config::Settings;
use crate::error::{JobError, StoreError};
use crate::models::{MediaFile, TripStatus, TripUpdate};
use crate::store::SharedStore;
use crate::storyboard::{self, StoryMedia, StoryOptions};

pub const DEFAULT_STYLE: &str = "cinematic";

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub trip_id: u64,
    pub prompt: String,
    #[serde(default = "default_style")]
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationAccepted {
    pub message: String,
    pub trip_id: u64,
    pub status: TripStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub trip_id: u64,
    pub status: TripStatus,
    pub generated_video_url: Option<String>,
}

/// Where the finished video of a trip is served.
pub fn generated_video_url(trip_id: u64) -> String {
    format!("/api/v1/videos/{}/generated.mp4", trip_id)
}

#[derive(Clone)]
pub struct GenerationRunner {
    store: SharedStore,
    settings: Arc<Settings>,
}

impl GenerationRunner {
    pub fn new(store: SharedStore, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }

    /// Validate and start a job for `owner_id`.
    ///
    /// The returned handle resolves to the trip's final status.
    pub async fn start(
        &self,
        request: GenerationRequest,
        owner_id: u64,
    ) -> Result<(GenerationAccepted, JoinHandle<TripStatus>), JobError> {
        let trip_id = request.trip_id;
        let (title, media) = {
            let mut store = self.store.lock().await;
            let trip = store
                .trip(trip_id)
                .filter(|t| t.owner_id == owner_id)
                .ok_or(JobError::TripNotFound)?;
            if trip.status == TripStatus::Processing {
                return Err(JobError::AlreadyProcessing(trip_id));
            }
            let title = trip.title.clone();

            let media = store.media_by_trip(trip_id);
            if media.is_empty() {
                return Err(JobError::NoMedia);
            }

            store.update_trip(
                trip_id,
                TripUpdate {
                    prompt: Some(request.prompt.clone()),
                    style: Some(request.style.clone()),
                    status: Some(TripStatus::Processing),
                    ..Default::default()
                },
            )?;
            (title, media)
        };

        log_trip(
            LogLevel::Info,
            trip_id,
            format!("Generating {} story from {} files", request.style, media.len()),
        );

        let runner = self.clone();
        let job = tokio::spawn(async move { runner.run(trip_id, title, request.style, media).await });
        let runner = self.clone();
        let handle = tokio::spawn(async move { runner.supervise(trip_id, job).await });

        Ok((
            GenerationAccepted {
                message: "Video generation started".to_string(),
                trip_id,
                status: TripStatus::Processing,
            },
            handle,
        ))
    }

    async fn run(&self, trip_id: u64, title: String, style: String, media: Vec<MediaFile>) -> TripStatus {
        let items: Vec<StoryMedia> = media.iter().map(StoryMedia::from).collect();
        let options = StoryOptions {
            title: Some(title),
            style: Some(style),
            intro: true,
            outro: true,
        };
        let board = storyboard::build(&items, &options, &self.settings.video);
        log_trip(
            LogLevel::Info,
            trip_id,
            format!("Storyboard: {} segments, {:.1}s", board.segments.len(), board.duration()),
        );

        tokio::time::sleep(self.settings.generation_delay).await;

        match self.finish(trip_id).await {
            Ok(()) => {
                log_trip(LogLevel::Success, trip_id, "Video generation completed");
                TripStatus::Completed
            }
            Err(e) => {
                log_trip(LogLevel::Error, trip_id, format!("Video generation failed: {}", e));
                self.mark_failed(trip_id).await;
                TripStatus::Failed
            }
        }
    }

    /// Wait for `job`; a job that panics or is cancelled leaves the trip failed
    /// instead of stuck in `processing`.
    async fn supervise(&self, trip_id: u64, job: JoinHandle<TripStatus>) -> TripStatus {
        match job.await {
            Ok(status) => status,
            Err(e) => {
                log_trip(LogLevel::Error, trip_id, format!("Video generation aborted: {}", e));
                self.mark_failed(trip_id).await;
                TripStatus::Failed
            }
        }
    }

    async fn mark_failed(&self, trip_id: u64) {
        let mut store = self.store.lock().await;
        // The trip may be gone already.
        let _ = store.update_trip(
            trip_id,
            TripUpdate {
                status: Some(TripStatus::Failed),
                ..Default::default()
            },
        );
    }

    async fn finish(&self, trip_id: u64) -> Result<(), StoreError> {
        let mut store = self.store.lock().await;
        store.update_trip(
            trip_id,
            TripUpdate {
                status: Some(TripStatus::Completed),
                generated_video_url: Some(generated_video_url(trip_id)),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    pub async fn status(&self, trip_id: u64, owner_id: u64) -> Result<GenerationStatus, JobError> {
        let store = self.store.lock().await;
        let trip = store
            .trip(trip_id)
            .filter(|t| t.owner_id == owner_id)
            .ok_or(JobError::TripNotFound)?;
        Ok(GenerationStatus {
            trip_id,
            status: trip.status,
            generated_video_url: trip.generated_video_url.clone(),
        })
    }
}

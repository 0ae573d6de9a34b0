//! HTTP server for the Trip Tales API.
//!
//! # API Endpoints
//!
//! | Method | Path                                 | Description                     |
//! |--------|--------------------------------------|---------------------------------|
//! | GET    | `/`                                  | Service banner                  |
//! | GET    | `/health`                            | Health check                    |
//! | POST   | `/upload/`                           | Upload media (browser client)   |
//! | GET    | `/uploads/*`                         | Uploaded files                  |
//! | GET    | `/api/logs`                          | SSE stream of server events     |
//! | GET    | `/api/v1/trips/`                     | List trips                      |
//! | POST   | `/api/v1/trips/`                     | Create trip                     |
//! | GET    | `/api/v1/trips/{id}`                 | Read trip                       |
//! | PUT    | `/api/v1/trips/{id}`                 | Update trip                     |
//! | DELETE | `/api/v1/trips/{id}`                 | Delete trip and its media       |
//! | POST   | `/api/v1/upload/files/`              | Upload media to a trip          |
//! | GET    | `/api/v1/upload/trips/{id}/files/`   | List a trip's media             |
//! | DELETE | `/api/v1/upload/files/{id}`          | Delete a media file             |
//! | POST   | `/api/v1/ai/generate-video/`         | Start video generation          |
//! | GET    | `/api/v1/ai/status/{id}`             | Generation status               |

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    response::{sse::Event, Json, Sse},
    routing::{delete, get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use super::logs::{log_info, LOG_BROADCASTER};
use super::{ai, media, trips};
use crate::config::Settings;
use crate::jobs::GenerationRunner;
use crate::store::{SharedStore, TripStore};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: SharedStore,
    pub jobs: GenerationRunner,
}

impl AppState {
    pub fn new(settings: Settings, store: TripStore) -> Self {
        let settings = Arc::new(settings);
        let store = store.into_shared();
        let jobs = GenerationRunner::new(store.clone(), settings.clone());
        Self { settings, store, jobs }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/trips/", get(trips::list).post(trips::create))
        .route("/trips/{id}", get(trips::read).put(trips::update).delete(trips::remove))
        .route("/upload/files/", post(media::upload_trip_files))
        .route("/upload/trips/{id}/files/", get(media::trip_files))
        .route("/upload/files/{id}", delete(media::delete_file))
        .route("/ai/generate-video/", post(ai::generate_video))
        .route("/ai/status/{id}", get(ai::status));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/upload/", post(media::upload))
        .route("/api/logs", get(sse_logs))
        .nest("/api/v1", v1)
        .nest_service("/uploads", ServeDir::new(&state.settings.upload_dir))
        .layer(DefaultBodyLimit::max(state.settings.max_request_size))
        .layer(cors_layer(&state.settings.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Start the HTTP server
pub async fn start_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    let store = TripStore::open(&settings.data_file)?;
    let addr = settings.bind_address();
    let upload_dir = settings.upload_dir.display().to_string();

    let app = router(AppState::new(settings, store));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("🚀 Trip Tales API running on http://{}", addr);
    println!("   POST /upload/            - Upload photos and clips");
    println!("   /api/v1/...              - Trips, media and generation");
    println!("   GET  /api/logs           - SSE event stream");
    println!("   GET  /uploads/*          - Files in {}", upload_dir);
    println!();
    log_info(format!("Listening on {}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Trip Tales API is running!",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "trip-tales-api",
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip the entries they missed.
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_and_health() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let (status, body) = send(&state, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Trip Tales API is running!");

        let (status, body) = send(&state, empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/upload/")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/upload/")
            .header(header::ORIGIN, "http://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_uploaded_files_are_served() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        std::fs::create_dir_all(&state.settings.upload_dir).unwrap();
        std::fs::write(state.settings.upload_dir.join("sunset.jpg"), b"jpeg").unwrap();

        let response = router(state)
            .oneshot(empty_request("GET", "/uploads/sunset.jpg"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

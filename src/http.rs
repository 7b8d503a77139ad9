//! HTTP front door: the three overlay routes, a health probe and static
//! file serving of the public directory.

use crate::assets;
use crate::config::Config;
use crate::error::OverlayError;
use crate::overlay;
use crate::overlay::video::{FfmpegRunner, TranscodeRunner};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::io;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    transcoder: Arc<dyn TranscodeRunner>,
}

/// Build the application router against the real ffmpeg binary.
pub fn app(config: Config) -> Router {
    app_with_transcoder(config, Arc::new(FfmpegRunner))
}

/// Router with an injected transcoder, for exercising the HTTP surface
/// without an ffmpeg on PATH.
pub fn app_with_transcoder(config: Config, transcoder: Arc<dyn TranscodeRunner>) -> Router {
    let public_dir = config.public_dir.clone();
    let state = AppState {
        config: Arc::new(config),
        transcoder,
    };

    Router::new()
        .route("/overlay-image", get(overlay_image))
        .route("/overlay-pdf", get(overlay_pdf))
        .route("/overlay-video", get(overlay_video))
        .route("/healthz", get(health))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
}

async fn overlay_image(State(state): State<AppState>) -> Result<Response, OverlayError> {
    let paths = state.config.assets.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        overlay::image::overlay_image(&paths.base_image, &paths.logo)
    })
    .await
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

    let output = &state.config.assets.image_output;
    assets::persist(output, &bytes).await?;
    assets::stream_file(output, "image/jpeg").await
}

async fn overlay_pdf(State(state): State<AppState>) -> Result<Response, OverlayError> {
    let logo = state.config.assets.logo.clone();
    let bytes = tokio::task::spawn_blocking(move || overlay::document::overlay_document(&logo))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

    let output = &state.config.assets.document_output;
    assets::persist(output, &bytes).await?;
    assets::stream_file(output, "application/pdf").await
}

async fn overlay_video(State(state): State<AppState>) -> Result<Response, OverlayError> {
    info!("received request for /overlay-video");

    let paths = &state.config.assets;
    overlay::video::overlay_video(
        state.transcoder.as_ref(),
        &paths.input_video,
        &paths.logo,
        &paths.video_output,
    )
    .await?;

    assets::stream_file(&paths.video_output, "video/mp4").await
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

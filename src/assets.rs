//! Fixed-path asset access: read-only inputs, overwritten outputs.

use crate::error::OverlayError;
use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Fail fast when a provisioned input is absent.
pub fn require_input(path: &Path) -> Result<(), OverlayError> {
    if path.exists() {
        Ok(())
    } else {
        Err(OverlayError::InputMissing(path.to_path_buf()))
    }
}

/// Create the parent directory of an output path if it does not exist yet.
pub async fn ensure_parent_dir(path: &Path) -> Result<(), OverlayError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Persist freshly derived bytes at a fixed output path, replacing any
/// previous run's artifact.
pub async fn persist(path: &Path, bytes: &[u8]) -> Result<(), OverlayError> {
    ensure_parent_dir(path).await?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Stream a result file back as the response body.
pub async fn stream_file(
    path: &Path,
    content_type: &'static str,
) -> Result<Response, OverlayError> {
    let file = tokio::fs::File::open(path).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

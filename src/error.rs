//! Error taxonomy for the overlay handlers.
//!
//! Every failure is mapped to a response at the HTTP boundary and nowhere
//! else. Full diagnostic detail goes to the log; the client only ever sees a
//! short generic message and a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// The fixed input video is absent. The only client-distinguished
    /// failure class.
    #[error("input video does not exist")]
    InputMissing(PathBuf),

    /// Image decode, resize, composite or encode failure.
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// The embedded caption font failed to parse.
    #[error("caption font failed to parse")]
    Font(#[from] ab_glyph::InvalidFont),

    /// Document construction or serialization failure.
    #[error("document processing failed: {0}")]
    Document(#[from] oxidize_pdf::PdfError),

    /// The transcoder exited with a non-zero status.
    #[error("transcoder exited with {status}")]
    Transcode { status: ExitStatus, stderr: String },

    /// The transcoder reported success but produced no output file.
    #[error("transcoder produced no output file")]
    OutputMissing(PathBuf),

    /// Filesystem or process-launch failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OverlayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InputMissing(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message safe to hand to a client. Never includes paths,
    /// library detail or captured process output.
    fn public_message(&self) -> &'static str {
        match self {
            Self::InputMissing(_) => "Video file does not exist.",
            Self::Image(_) | Self::Font(_) => "Error processing image",
            Self::Document(_) => "Error processing PDF",
            Self::Transcode { .. } => "Error processing video",
            Self::OutputMissing(_) => "Output video file not created.",
            Self::Io(_) => "Internal server error",
        }
    }
}

impl IntoResponse for OverlayError {
    fn into_response(self) -> Response {
        match &self {
            Self::Transcode { status, stderr } => {
                error!(status = %status, stderr = %stderr, "transcoder failed");
            }
            other => error!(error = ?other, "request failed"),
        }

        (self.status(), self.public_message()).into_response()
    }
}

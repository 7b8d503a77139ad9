//! Environment configuration and the fixed asset layout.

use std::env;
use std::path::{Path, PathBuf};

/// Runtime configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory served verbatim as static files; all media lives beneath it
    pub public_dir: PathBuf,
    /// Fixed input/output locations used by the overlay handlers
    pub assets: AssetPaths,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let public_dir =
            PathBuf::from(env::var("PUBLIC_DIR").unwrap_or_else(|_| String::from("public")));

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3000")),
            assets: AssetPaths::under(&public_dir),
            public_dir,
        }
    }
}

/// Fixed filesystem layout of the overlay inputs and outputs.
///
/// Handlers receive these paths at construction time instead of hard-coding
/// them. Inputs are provisioned out of band and never mutated; each output
/// is overwritten on every request to its endpoint.
#[derive(Clone, Debug)]
pub struct AssetPaths {
    /// Base bitmap the image overlay composites onto
    pub base_image: PathBuf,
    /// Logo bitmap, shared by all three overlays
    pub logo: PathBuf,
    /// Source video container
    pub input_video: PathBuf,
    /// Co-branded JPEG output
    pub image_output: PathBuf,
    /// Co-branded PDF output
    pub document_output: PathBuf,
    /// Co-branded MP4 output
    pub video_output: PathBuf,
}

impl AssetPaths {
    /// Resolve the fixed layout beneath a public directory.
    pub fn under(public_dir: &Path) -> Self {
        let uploads = public_dir.join("uploads");

        Self {
            base_image: uploads.join("base-image.jpeg"),
            logo: uploads.join("logo.png"),
            input_video: uploads.join("input-video.mp4"),
            image_output: uploads.join("base-image-modified.jpg"),
            document_output: uploads.join("output-document.pdf"),
            video_output: uploads.join("output-video.mp4"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_layout_lives_under_uploads() {
        let paths = AssetPaths::under(Path::new("public"));

        assert_eq!(paths.base_image, Path::new("public/uploads/base-image.jpeg"));
        assert_eq!(paths.logo, Path::new("public/uploads/logo.png"));
        assert_eq!(paths.input_video, Path::new("public/uploads/input-video.mp4"));
        assert_eq!(
            paths.image_output,
            Path::new("public/uploads/base-image-modified.jpg")
        );
        assert_eq!(
            paths.document_output,
            Path::new("public/uploads/output-document.pdf")
        );
        assert_eq!(
            paths.video_output,
            Path::new("public/uploads/output-video.mp4")
        );
    }
}

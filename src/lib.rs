//! Cobrand - Co-Branding Overlay Service
//!
//! Three stateless GET endpoints stamp a fixed logo and caption onto a
//! pre-provisioned image, PDF and video, each overwriting a fixed output
//! file and streaming it back.
//!
//! - config: environment configuration and the fixed asset layout
//! - assets: input existence checks, output persistence and file streaming
//! - overlay: the image, document and video transformations
//! - http: axum router, handlers and static file serving
//! - error: the error taxonomy, mapped to statuses at the HTTP boundary only

pub mod assets;
pub mod config;
pub mod error;
pub mod http;
pub mod overlay;

// Re-exports for convenience
pub use config::Config;
pub use error::OverlayError;

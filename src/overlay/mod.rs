//! The three fixed co-branding transformations.
//!
//! Each submodule implements one endpoint's transformation against the fixed
//! asset layout. They share no runtime state; the only common ground is the
//! normalized logo geometry below.

pub mod document;
pub mod image;
pub mod video;

/// Logo edge length after normalization, shared by all three overlays.
pub const LOGO_SIZE: u32 = 50;

/// Inset between the logo and the frame edges, and between the caption and
/// the logo.
pub const PADDING: u32 = 10;

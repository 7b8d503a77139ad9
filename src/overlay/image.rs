//! Logo and caption compositing onto the base bitmap.

use crate::error::OverlayError;
use crate::overlay::{LOGO_SIZE, PADDING};
use ab_glyph::{FontRef, PxScale};
use image::buffer::ConvertBuffer;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::io::Cursor;
use std::path::Path;

/// Dimensions the base image is normalized to.
pub const OUTPUT_WIDTH: u32 = 500;
pub const OUTPUT_HEIGHT: u32 = 400;

/// Caption stamped immediately left of the logo.
pub const CAPTION: &str = "Co-branded Image";

const CAPTION_SCALE: f32 = 16.0;

/// DejaVu Sans, embedded so caption rendering has no font lookup failure
/// mode at runtime.
const CAPTION_FONT: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf"));

fn caption_font() -> Result<FontRef<'static>, OverlayError> {
    Ok(FontRef::try_from_slice(CAPTION_FONT)?)
}

/// Bottom-right anchor of a `size`-square overlay inside a `width`x`height`
/// frame, inset by `margin` on both axes.
fn overlay_anchor(width: u32, height: u32, size: u32, margin: u32) -> (u32, u32) {
    (
        width.saturating_sub(size + margin),
        height.saturating_sub(size + margin),
    )
}

/// Run the full image transformation: load both fixed inputs, composite,
/// encode as JPEG.
pub fn overlay_image(base_image: &Path, logo: &Path) -> Result<Vec<u8>, OverlayError> {
    let base = image::open(base_image)?;
    let logo = image::open(logo)?;

    encode_jpeg(&compose(&base, &logo)?)
}

/// Produce the composited 500x400 frame: base resized without preserving
/// aspect ratio, logo normalized to 50x50 and blended source-over at the
/// bottom-right anchor, white caption drawn left of it.
fn compose(base: &DynamicImage, logo: &DynamicImage) -> Result<RgbaImage, OverlayError> {
    let mut canvas = base
        .resize_exact(OUTPUT_WIDTH, OUTPUT_HEIGHT, FilterType::Lanczos3)
        .to_rgba8();
    let logo = logo
        .resize_exact(LOGO_SIZE, LOGO_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let (logo_x, logo_y) = overlay_anchor(OUTPUT_WIDTH, OUTPUT_HEIGHT, LOGO_SIZE, PADDING);
    image::imageops::overlay(&mut canvas, &logo, i64::from(logo_x), i64::from(logo_y));

    let font = caption_font()?;
    let scale = PxScale::from(CAPTION_SCALE);
    let (text_width, _) = text_size(scale, &font, CAPTION);

    let caption_x = i64::from(logo_x) - i64::from(text_width) - i64::from(PADDING);
    let caption_y = i64::from(logo_y) + i64::from(PADDING);

    draw_text_mut(
        &mut canvas,
        Rgba([255, 255, 255, 255]),
        caption_x as i32,
        caption_y as i32,
        scale,
        &font,
        CAPTION,
    );

    Ok(canvas)
}

/// Encode the composited frame as JPEG.
fn encode_jpeg(frame: &RgbaImage) -> Result<Vec<u8>, OverlayError> {
    let rgb: RgbImage = frame.convert();
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)?;

    Ok(buf.into_inner())
}

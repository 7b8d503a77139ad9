//! Single-page co-branded PDF.

use crate::error::OverlayError;
use crate::overlay::{LOGO_SIZE, PADDING};
use image::ImageFormat;
use oxidize_pdf::graphics::Image as EmbeddedImage;
use oxidize_pdf::text::measure_text;
use oxidize_pdf::{Document, Font, Page};
use std::io::Cursor;
use std::path::Path;

/// Page size in points.
pub const PAGE_WIDTH: f64 = 500.0;
pub const PAGE_HEIGHT: f64 = 400.0;

/// Body copy drawn near the top of the page.
const BODY_TEXT: &str = "This is the PDF file";

/// Caption stamped immediately left of the logo.
pub const CAPTION: &str = "Co-branded Image";

const FONT_SIZE: f64 = 16.0;

fn logo_x() -> f64 {
    PAGE_WIDTH - f64::from(LOGO_SIZE) - f64::from(PADDING)
}

/// Caption x derived from the font's advance width for the caption string,
/// so the caption's right edge stays clear of the logo for any caption.
fn caption_x(caption: &str) -> f64 {
    logo_x() - measure_text(caption, Font::TimesRoman, FONT_SIZE) - f64::from(PADDING)
}

/// Build the co-branded document and serialize it to bytes.
pub fn overlay_document(logo_path: &Path) -> Result<Vec<u8>, OverlayError> {
    let logo = embed_logo(logo_path)?;

    let mut doc = Document::new();
    let mut page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);

    page.text()
        .set_font(Font::TimesRoman, FONT_SIZE)
        .at(50.0, PAGE_HEIGHT - 30.0)
        .write(BODY_TEXT)?;

    page.text()
        .set_font(Font::TimesRoman, FONT_SIZE)
        .at(caption_x(CAPTION), f64::from(PADDING))
        .write(CAPTION)?;

    page.add_image("logo", logo);
    page.draw_image(
        "logo",
        logo_x(),
        f64::from(PADDING),
        f64::from(LOGO_SIZE),
        f64::from(LOGO_SIZE),
    )?;

    doc.add_page(page);

    let mut bytes = Vec::new();
    doc.write(&mut bytes)?;

    Ok(bytes)
}

/// The logo is provisioned as PNG; re-encode it to baseline JPEG so it can
/// be embedded as a DCTDecode image object.
fn embed_logo(path: &Path) -> Result<EmbeddedImage, OverlayError> {
    let logo = image::open(path)?;

    let mut jpeg = Cursor::new(Vec::new());
    logo.to_rgb8().write_to(&mut jpeg, ImageFormat::Jpeg)?;

    Ok(EmbeddedImage::from_jpeg_data(jpeg.into_inner())?)
}

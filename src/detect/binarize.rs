//! Ink/paper binarization
//!
//! Scanned textbook pages are near-white paper with darker printed
//! content, so a single fixed intensity cut separates the two.

use image::{DynamicImage, GrayImage, Luma, Rgb};
use log::debug;

/// Intensity below which a pixel counts as ink (0-255 scale)
pub const INK_THRESHOLD: u8 = 240;

/// Mask value for ink pixels
pub const FOREGROUND: u8 = 255;

/// Mask value for paper pixels
pub const BACKGROUND: u8 = 0;

/// BT.601 luma of an RGB pixel, rounded to the nearest integer
///
/// Scanner output is calibrated against these weights, not the Rec.709
/// ones `image` uses for `to_luma8`.
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((weighted + 500) / 1000) as u8
}

/// Convert a page to a binary ink mask
///
/// Pixels whose grayscale intensity is strictly below [`INK_THRESHOLD`]
/// become [`FOREGROUND`]; everything else becomes [`BACKGROUND`].
pub fn ink_mask(page: &DynamicImage) -> GrayImage {
    let rgb = page.to_rgb8();
    let mut mask = GrayImage::new(rgb.width(), rgb.height());

    for (x, y, pixel) in rgb.enumerate_pixels() {
        if luma(pixel) < INK_THRESHOLD {
            mask.put_pixel(x, y, Luma([FOREGROUND]));
        }
    }

    debug!("Binarized {}x{} page at threshold {}", rgb.width(), rgb.height(), INK_THRESHOLD);
    mask
}

//! Image downsampling utilities.
//!
//! Provides aspect-ratio-preserving reduction used before palette
//! extraction and when fitting icons into their slots.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Shrink an image so its longest side is at most `max_side` pixels.
///
/// Uses triangle filtering, which is plenty for color sampling.
/// Returns a copy of the original when it already fits.
pub fn downsample(img: &RgbaImage, max_side: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();
    let longest = orig_w.max(orig_h);

    if longest <= max_side || max_side == 0 {
        debug!(orig_w, orig_h, max_side, "Image already fits, skipping downsample");
        return img.clone();
    }

    let ratio = f64::from(max_side) / f64::from(longest);
    let new_width = ((f64::from(orig_w) * ratio).round() as u32).max(1);
    let new_height = ((f64::from(orig_h) * ratio).round() as u32).max(1);

    debug!(orig_w, orig_h, new_width, new_height, "Downsampling image");

    imageops::resize(img, new_width, new_height, FilterType::Triangle)
}

/// Scale an image to exactly `size`×`size` pixels.
pub fn fit_square(img: &RgbaImage, size: u32) -> RgbaImage {
    if img.dimensions() == (size, size) {
        return img.clone();
    }
    imageops::resize(img, size.max(1), size.max(1), FilterType::Triangle)
}

//! Image composition utilities: overlay, flat tinting, shaped backgrounds
//! and rounded corners.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::resize::fit_square;
use crate::shape::IconShape;
use crate::{ImageError, Result};

/// Largest accepted icon padding, in percent of the canvas side.
pub const MAX_PADDING_PERCENT: u8 = 45;

/// Overlay `top` onto `base` at the given position.
///
/// `top` is alpha-composited over the base; pixels falling outside the base
/// are dropped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

/// Recolor every pixel to `color`, keeping only the source alpha.
pub fn tint(icon: &RgbaImage, color: Color) -> RgbaImage {
    let [r, g, b] = color.rgb();
    let tint_alpha = f32::from(color.alpha()) / 255.0;
    let mut out = RgbaImage::new(icon.width(), icon.height());
    for (x, y, pixel) in icon.enumerate_pixels() {
        let a = (f32::from(pixel[3]) * tint_alpha).round() as u8;
        out.put_pixel(x, y, Rgba([r, g, b, a]));
    }
    out
}

/// Render `icon` as a flat `tint_color` glyph centered on a `shape`
/// filled with `background`, on a `size`×`size` canvas.
///
/// `padding_percent` is the gap between the canvas edge and the glyph on
/// each side. The shape clips the glyph, so shape and background alone
/// define the visible silhouette.
pub fn compose_on_shape(
    icon: &RgbaImage,
    tint_color: Color,
    background: Color,
    shape: IconShape,
    size: u32,
    padding_percent: u8,
) -> Result<RgbaImage> {
    if icon.width() == 0 || icon.height() == 0 {
        return Err(ImageError::Empty);
    }
    if size == 0 {
        return Err(ImageError::InvalidSize(size));
    }
    if padding_percent > MAX_PADDING_PERCENT {
        return Err(ImageError::InvalidPadding(padding_percent));
    }

    let pad = size * u32::from(padding_percent) / 100;
    let inner = size.saturating_sub(pad * 2).max(1);
    debug!(size, pad, inner, shape = shape.id(), "Compositing icon on shape");

    let mut canvas = RgbaImage::new(size, size);
    if shape != IconShape::None {
        let fill = background.to_rgba();
        for y in 0..size {
            for x in 0..size {
                if shape.contains(x, y, size) {
                    canvas.put_pixel(x, y, fill);
                }
            }
        }
    }

    let glyph = tint(&fit_square(icon, inner), tint_color);
    overlay(&mut canvas, &glyph, pad, pad);

    if shape != IconShape::None {
        for y in 0..size {
            for x in 0..size {
                if !shape.contains(x, y, size) {
                    canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                }
            }
        }
    }

    Ok(canvas)
}

/// Clear the pixels outside a rounded rectangle with corner radius
/// `radius_fraction` × the shorter side.
pub fn round_corners(img: &RgbaImage, radius_fraction: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let radius = (w.min(h) as f32 * radius_fraction.clamp(0.0, 0.5)).max(0.0);
    let mut out = img.clone();
    if radius < 1.0 {
        return out;
    }

    for y in 0..h {
        for x in 0..w {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let cx = px.clamp(radius, w as f32 - radius);
            let cy = py.clamp(radius, h as f32 - radius);
            let (dx, dy) = (px - cx, py - cy);
            if dx * dx + dy * dy > radius * radius {
                out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }
    out
}

/// Source-over blend of `fg` (with the given alpha) onto `bg`.
fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    if out_alpha <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (fg[i] as f32 * alpha + bg[i] as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}

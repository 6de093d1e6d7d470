//! Small built-in glyphs drawn at runtime.

use image::RgbaImage;
use imageproc::drawing::draw_line_segment_mut;

use crate::color::Color;

/// Draw a check mark ("tick") in `color` on a transparent `size`×`size`
/// canvas. Stroke width scales with the canvas.
pub fn tick(size: u32, color: Color) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    if size == 0 {
        return img;
    }
    let s = size as f32;
    let start = (s * 0.20, s * 0.52);
    let elbow = (s * 0.42, s * 0.72);
    let end = (s * 0.80, s * 0.30);
    let stroke = ((s * 0.10).round() as i32).max(1);
    let rgba = color.to_rgba();

    for oy in -(stroke / 2)..=(stroke / 2) {
        for ox in -(stroke / 2)..=(stroke / 2) {
            let (ox, oy) = (ox as f32, oy as f32);
            draw_line_segment_mut(
                &mut img,
                (start.0 + ox, start.1 + oy),
                (elbow.0 + ox, elbow.1 + oy),
                rgba,
            );
            draw_line_segment_mut(
                &mut img,
                (elbow.0 + ox, elbow.1 + oy),
                (end.0 + ox, end.1 + oy),
                rgba,
            );
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_draws_something_in_color() {
        let color = Color::from_rgb(0, 200, 0);
        let img = tick(48, color);
        let painted = img.pixels().filter(|p| p[3] == 255).count();
        assert!(painted > 20, "expected a visible stroke, got {painted} pixels");
        assert!(img.pixels().filter(|p| p[3] == 255).all(|p| p.0 == [0, 200, 0, 255]));
        // Top-left corner stays empty.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn tick_zero_size_is_empty() {
        assert_eq!(tick(0, Color::WHITE).dimensions(), (0, 0));
    }
}

//! Brand color extraction from launcher icons.

use island_image::{Color, Palette, Swatch, is_near_grayscale};

use crate::platform::Bitmap;

/// Extract an app's brand color from its launcher icon.
pub fn extract_brand_color(icon: &Bitmap) -> Option<Color> {
    let palette = Palette::from_image(icon);
    pick_brand_color(&palette)
}

/// First non-gray candidate (vibrant, dark vibrant, light vibrant,
/// dominant, muted), else the dominant swatch, else nothing.
pub fn pick_brand_color(palette: &Palette) -> Option<Color> {
    palette
        .brand_candidates()
        .iter()
        .flatten()
        .map(|s: &Swatch| s.color)
        .find(|&c| !is_near_grayscale(c))
        .or_else(|| palette.dominant.map(|s| s.color))
}

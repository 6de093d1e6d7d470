//! Palette extraction.
//!
//! Quantizes an image into at most [`MAX_SWATCHES`] color buckets, then
//! scores the buckets against six saturation/lightness targets
//! (vibrant / muted, each in light, normal and dark flavors). The most
//! populous bucket is the dominant swatch.

use std::collections::HashMap;

use image::RgbaImage;
use tracing::debug;

use crate::color::Color;
use crate::resize::downsample;
use crate::PALETTE_SAMPLE_SIDE;

/// Maximum number of quantized buckets considered for target matching.
pub const MAX_SWATCHES: usize = 16;

/// Pixels with alpha below this are ignored.
const MIN_ALPHA: u8 = 128;

/// Channel-distance sum under which a color is treated as gray.
const GRAYSCALE_THRESHOLD: u32 = 30;

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LIGHTNESS: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

/// One representative color and how many sampled pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Color,
    pub population: u32,
}

impl Swatch {
    pub fn new(color: Color, population: u32) -> Self {
        Self { color, population }
    }

    /// Hue (degrees), saturation and lightness (both `0.0..=1.0`).
    pub fn hsl(&self) -> [f32; 3] {
        rgb_to_hsl(self.color.rgb())
    }

    /// Text color readable on top of this swatch, for titles.
    pub fn title_text_color(&self) -> Color {
        if self.color.luminance() > 0.5 {
            Color(0xDE00_0000)
        } else {
            Color::WHITE
        }
    }

    /// Text color readable on top of this swatch, for body text.
    pub fn body_text_color(&self) -> Color {
        if self.color.luminance() > 0.5 {
            Color(0x8A00_0000)
        } else {
            Color(0xB3FF_FFFF)
        }
    }
}

/// Whether a color is close enough to gray to be useless as an accent:
/// `|R−G| + |G−B| + |B−R| < 30`.
pub fn is_near_grayscale(color: Color) -> bool {
    let [r, g, b] = color.rgb().map(i32::from);
    let spread = (r - g).unsigned_abs() + (g - b).unsigned_abs() + (b - r).unsigned_abs();
    spread < GRAYSCALE_THRESHOLD
}

/// Swatches selected from one image.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub vibrant: Option<Swatch>,
    pub dark_vibrant: Option<Swatch>,
    pub light_vibrant: Option<Swatch>,
    pub muted: Option<Swatch>,
    pub dark_muted: Option<Swatch>,
    pub light_muted: Option<Swatch>,
    pub dominant: Option<Swatch>,
    pub swatches: Vec<Swatch>,
}

struct Target {
    saturation: (f32, f32, f32),
    lightness: (f32, f32, f32),
}

const LIGHT_VIBRANT: Target = Target {
    saturation: (0.35, 1.0, 1.0),
    lightness: (0.55, 0.74, 1.0),
};
const VIBRANT: Target = Target {
    saturation: (0.35, 1.0, 1.0),
    lightness: (0.3, 0.5, 0.7),
};
const DARK_VIBRANT: Target = Target {
    saturation: (0.35, 1.0, 1.0),
    lightness: (0.0, 0.26, 0.45),
};
const LIGHT_MUTED: Target = Target {
    saturation: (0.0, 0.3, 0.4),
    lightness: (0.55, 0.74, 1.0),
};
const MUTED: Target = Target {
    saturation: (0.0, 0.3, 0.4),
    lightness: (0.3, 0.5, 0.7),
};
const DARK_MUTED: Target = Target {
    saturation: (0.0, 0.3, 0.4),
    lightness: (0.0, 0.26, 0.45),
};

impl Palette {
    /// Extract a palette from an image, downsampling it first.
    pub fn from_image(img: &RgbaImage) -> Self {
        let sample = downsample(img, PALETTE_SAMPLE_SIDE);
        let swatches = quantize(&sample);
        debug!(
            width = sample.width(),
            height = sample.height(),
            swatches = swatches.len(),
            "Quantized image for palette"
        );
        Self::from_swatches(swatches)
    }

    /// Run target selection over already-quantized swatches.
    pub fn from_swatches(mut swatches: Vec<Swatch>) -> Self {
        swatches.sort_by(|a, b| b.population.cmp(&a.population));
        let dominant = swatches.first().copied();
        let max_population = dominant.map_or(1, |s| s.population.max(1));

        let mut used: Vec<Color> = Vec::new();
        let mut pick = |target: &Target| {
            let best = select(&swatches, target, max_population, &used);
            if let Some(s) = best {
                used.push(s.color);
            }
            best
        };

        // Evaluation order matters: each swatch fills at most one target.
        let light_vibrant = pick(&LIGHT_VIBRANT);
        let vibrant = pick(&VIBRANT);
        let dark_vibrant = pick(&DARK_VIBRANT);
        let light_muted = pick(&LIGHT_MUTED);
        let muted = pick(&MUTED);
        let dark_muted = pick(&DARK_MUTED);

        Self {
            vibrant,
            dark_vibrant,
            light_vibrant,
            muted,
            dark_muted,
            light_muted,
            dominant,
            swatches,
        }
    }

    /// Candidates for an app's brand color, in preference order:
    /// vibrant, dark vibrant, light vibrant, dominant, muted.
    pub fn brand_candidates(&self) -> [Option<Swatch>; 5] {
        [
            self.vibrant,
            self.dark_vibrant,
            self.light_vibrant,
            self.dominant,
            self.muted,
        ]
    }
}

fn select(
    swatches: &[Swatch],
    target: &Target,
    max_population: u32,
    used: &[Color],
) -> Option<Swatch> {
    let mut best: Option<(f32, Swatch)> = None;
    for swatch in swatches {
        if used.contains(&swatch.color) {
            continue;
        }
        let [_, s, l] = swatch.hsl();
        if s < target.saturation.0 || s > target.saturation.2 {
            continue;
        }
        if l < target.lightness.0 || l > target.lightness.2 {
            continue;
        }
        let score = WEIGHT_SATURATION * (1.0 - (s - target.saturation.1).abs())
            + WEIGHT_LIGHTNESS * (1.0 - (l - target.lightness.1).abs())
            + WEIGHT_POPULATION * (swatch.population as f32 / max_population as f32);
        if best.is_none_or(|(b, _)| score > b) {
            best = Some((score, *swatch));
        }
    }
    best.map(|(_, s)| s)
}

/// Bucket pixels at 5 bits per channel and average each bucket.
fn quantize(img: &RgbaImage) -> Vec<Swatch> {
    let mut buckets: HashMap<u16, (u64, u64, u64, u32)> = HashMap::new();
    for pixel in img.pixels() {
        if pixel[3] < MIN_ALPHA {
            continue;
        }
        let [r, g, b] = [pixel[0], pixel[1], pixel[2]];
        let key = (u16::from(r >> 3) << 10) | (u16::from(g >> 3) << 5) | u16::from(b >> 3);
        let entry = buckets.entry(key).or_insert((0, 0, 0, 0));
        entry.0 += u64::from(r);
        entry.1 += u64::from(g);
        entry.2 += u64::from(b);
        entry.3 += 1;
    }

    let mut swatches: Vec<(u16, Swatch)> = buckets
        .into_iter()
        .map(|(key, (r, g, b, n))| {
            let n64 = u64::from(n);
            let color = Color::from_rgb((r / n64) as u8, (g / n64) as u8, (b / n64) as u8);
            (key, Swatch::new(color, n))
        })
        .filter(|(_, s)| {
            // Near-black and near-white carry no brand information.
            let [_, _, l] = s.hsl();
            l > 0.05 && l < 0.95
        })
        .collect();

    swatches.sort_by(|a, b| b.1.population.cmp(&a.1.population).then(a.0.cmp(&b.0)));
    swatches.truncate(MAX_SWATCHES);
    swatches.into_iter().map(|(_, s)| s).collect()
}

fn rgb_to_hsl([r, g, b]: [u8; 3]) -> [f32; 3] {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta <= f32::EPSILON {
        return [0.0, 0.0, l];
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    [h * 60.0, s.clamp(0.0, 1.0), l]
}

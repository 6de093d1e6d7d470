//! Packed ARGB color.

use std::fmt;

use image::Rgba;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-bit color packed as `0xAARRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (a as u32) << 24)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        let [r, g, b] = self.rgb();
        Rgba([r, g, b, self.alpha()])
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self(0xFF00_0000 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }

    /// Relative luminance in `0.0..=1.0` (sRGB, WCAG formula).
    pub fn luminance(self) -> f64 {
        let channel = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        let [r, g, b] = self.rgb();
        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColorVisitor;

        impl Visitor<'_> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a #RRGGBB / #AARRGGBB string or an ARGB integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                Color::parse_hex(v).ok_or_else(|| E::custom(format!("invalid color: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Color, E> {
                u32::try_from(v)
                    .map(Color)
                    .map_err(|_| E::custom(format!("color out of range: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Color, E> {
                // Signed ARGB ints (as stored by some preference backends).
                i32::try_from(v)
                    .map(|i| Color(i as u32))
                    .map_err(|_| E::custom(format!("color out of range: {v}")))
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}

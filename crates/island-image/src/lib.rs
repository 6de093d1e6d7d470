//! Raster helpers for island rendering.
//!
//! Provides palette (swatch) extraction for brand and album-art colors,
//! downsampling, flat icon tinting, shaped background compositing and
//! rounded-corner masking.

pub mod color;
pub mod compose;
pub mod glyph;
pub mod palette;
pub mod resize;
pub mod shape;

// Re-exports for convenience
pub use color::Color;
pub use compose::{compose_on_shape, overlay, round_corners, tint};
pub use glyph::tick;
pub use palette::{Palette, Swatch, is_near_grayscale};
pub use resize::downsample;
pub use shape::IconShape;

/// Longest side (in pixels) images are reduced to before palette extraction.
pub const PALETTE_SAMPLE_SIDE: u32 = 112;

/// Errors that can occur while processing icons.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Image has no pixels")]
    Empty,

    #[error("Invalid target size: {0}")]
    InvalidSize(u32),

    #[error("Padding must be between 0 and 45 percent, got {0}")]
    InvalidPadding(u8),
}

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

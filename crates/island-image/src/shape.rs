//! Icon background silhouettes.

use serde::{Deserialize, Serialize};

/// Silhouette drawn behind action and summary icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconShape {
    #[default]
    Circle,
    RoundedSquare,
    Squircle,
    Square,
    /// No background; the tinted icon is drawn on transparency.
    None,
}

impl IconShape {
    /// Parse a shape id as stored in theme settings. Unknown ids yield `None`
    /// (the Rust `Option`), letting the caller fall back to its default.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "circle" => Some(Self::Circle),
            "rounded_square" | "rounded" => Some(Self::RoundedSquare),
            "squircle" => Some(Self::Squircle),
            "square" => Some(Self::Square),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::RoundedSquare => "rounded_square",
            Self::Squircle => "squircle",
            Self::Square => "square",
            Self::None => "none",
        }
    }

    /// Whether the pixel centered at `(x + 0.5, y + 0.5)` lies inside the
    /// shape inscribed in a `size`×`size` square.
    pub fn contains(self, x: u32, y: u32, size: u32) -> bool {
        if size == 0 {
            return false;
        }
        let half = size as f32 / 2.0;
        // Normalized coordinates in -1.0..=1.0
        let nx = ((x as f32 + 0.5) - half) / half;
        let ny = ((y as f32 + 0.5) - half) / half;

        match self {
            Self::Circle => nx * nx + ny * ny <= 1.0,
            Self::Square => true,
            Self::None => false,
            Self::Squircle => nx.abs().powi(4) + ny.abs().powi(4) <= 1.0,
            Self::RoundedSquare => {
                let r = 0.35f32;
                let dx = (nx.abs() - (1.0 - r)).max(0.0);
                let dy = (ny.abs() - (1.0 - r)).max(0.0);
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_round_trips() {
        for shape in [
            IconShape::Circle,
            IconShape::RoundedSquare,
            IconShape::Squircle,
            IconShape::Square,
            IconShape::None,
        ] {
            assert_eq!(IconShape::from_id(shape.id()), Some(shape));
        }
        assert_eq!(IconShape::from_id("hexagon"), None);
    }

    #[test]
    fn circle_excludes_corners() {
        assert!(IconShape::Circle.contains(50, 50, 100));
        assert!(!IconShape::Circle.contains(0, 0, 100));
        assert!(IconShape::Square.contains(0, 0, 100));
        assert!(!IconShape::None.contains(50, 50, 100));
    }

    #[test]
    fn squircle_sits_between_circle_and_square() {
        // Near the diagonal: outside the circle, inside the squircle.
        assert!(!IconShape::Circle.contains(12, 12, 100));
        assert!(IconShape::Squircle.contains(12, 12, 100));
        assert!(!IconShape::Squircle.contains(1, 1, 100));
    }
}

//! Coordinate normalization
//!
//! Backends report bounding boxes in whatever frame their engine uses:
//! absolute pixels or unit fractions, top-left or bottom-left origin. This
//! module converts all of them into one canonical frame: fractions of the
//! image dimensions, top-left origin, y increasing downward.
//!
//! Normalized output is clamped to [0, 1]. The platform engines have been
//! observed to report boxes slightly outside the image on rotated text.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
///
/// In the canonical frame all fields are fractions of the image dimensions
/// in [0, 1], top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Where the backend's coordinate origin sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Origin at the top-left corner, y grows downward (canonical)
    TopLeft,
    /// Origin at the bottom-left corner, y grows upward (Apple Vision style)
    BottomLeft,
}

/// How the backend expresses coordinate magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// Absolute pixel values relative to the decoded image
    Pixels,
    /// Unit fractions of the image dimensions
    Normalized,
}

/// The coordinate convention a backend emits its boxes in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFrame {
    pub origin: Origin,
    pub units: Units,
}

impl CoordinateFrame {
    /// The canonical frame: top-left origin, unit-normalized.
    pub const CANONICAL: Self = Self {
        origin: Origin::TopLeft,
        units: Units::Normalized,
    };
}

/// Clamp a value into the unit interval.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Convert a backend-native box into the canonical frame.
///
/// Pixel values are divided by the reference image dimensions; bottom-left
/// boxes have their vertical axis flipped (`y = 1 - y - height`). A box
/// already in the canonical frame comes back unchanged (modulo clamping).
pub fn normalize(
    raw: BoundingBox,
    frame: CoordinateFrame,
    image_width: u32,
    image_height: u32,
) -> BoundingBox {
    let (mut x, mut y, mut width, mut height) = (raw.x, raw.y, raw.width, raw.height);

    if frame.units == Units::Pixels {
        // A zero-sized reference image never reaches this point via the
        // decoder, but a degenerate box must not produce NaN/inf.
        let w = f64::from(image_width.max(1));
        let h = f64::from(image_height.max(1));
        x /= w;
        width /= w;
        y /= h;
        height /= h;
    }

    if frame.origin == Origin::BottomLeft {
        y = 1.0 - y - height;
    }

    BoundingBox {
        x: clamp_unit(x),
        y: clamp_unit(y),
        width: clamp_unit(width),
        height: clamp_unit(height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_box_is_unchanged() {
        let raw = BoundingBox::new(0.25, 0.5, 0.2, 0.1);
        let result = normalize(raw, CoordinateFrame::CANONICAL, 640, 480);
        assert_eq!(result, raw);
    }

    #[test]
    fn test_pixel_box_is_scaled_by_image_dimensions() {
        let frame = CoordinateFrame {
            origin: Origin::TopLeft,
            units: Units::Pixels,
        };
        let result = normalize(BoundingBox::new(100.0, 50.0, 200.0, 100.0), frame, 400, 200);
        assert_eq!(result, BoundingBox::new(0.25, 0.25, 0.5, 0.5));
    }

    #[test]
    fn test_bottom_left_box_is_flipped() {
        // Vision-style box over a unit image: y' = 1 - 0.1 - 0.2 = 0.7
        let frame = CoordinateFrame {
            origin: Origin::BottomLeft,
            units: Units::Normalized,
        };
        let result = normalize(BoundingBox::new(0.2, 0.1, 0.3, 0.2), frame, 100, 100);
        assert_eq!(result.x, 0.2);
        assert!((result.y - 0.7).abs() < 1e-9);
        assert_eq!(result.width, 0.3);
        assert_eq!(result.height, 0.2);
    }

    #[test]
    fn test_pixel_bottom_left_combined() {
        let frame = CoordinateFrame {
            origin: Origin::BottomLeft,
            units: Units::Pixels,
        };
        // 100x100 image, box at bottom-left pixel corner, 20px tall
        let result = normalize(BoundingBox::new(0.0, 0.0, 50.0, 20.0), frame, 100, 100);
        assert!((result.y - 0.8).abs() < 1e-9);
        assert_eq!(result.x, 0.0);
        assert_eq!(result.width, 0.5);
        assert!((result.height - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let result = normalize(
            BoundingBox::new(-0.1, 0.95, 1.4, 0.2),
            CoordinateFrame::CANONICAL,
            100,
            100,
        );
        assert_eq!(result.x, 0.0);
        assert_eq!(result.y, 0.95);
        assert_eq!(result.width, 1.0);
        assert_eq!(result.height, 0.2);
    }

    #[test]
    fn test_degenerate_reference_dimensions_do_not_produce_nan() {
        let frame = CoordinateFrame {
            origin: Origin::TopLeft,
            units: Units::Pixels,
        };
        let result = normalize(BoundingBox::new(10.0, 10.0, 5.0, 5.0), frame, 0, 0);
        assert!(result.x.is_finite());
        assert!(result.y.is_finite());
    }
}

//! Map pin coordinates for the fleet overview image.
//!
//! Equipment positions are stored as raw pixel coordinates against a
//! fixed reference floor image. Clients re-project pins onto whatever
//! size the image is actually rendered at, so the API hands out
//! resolution-independent fractions in `[0, 1]`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Width in pixels of the reference fleet-map image.
pub const REFERENCE_WIDTH: f64 = 1920.0;

/// Height in pixels of the reference fleet-map image.
pub const REFERENCE_HEIGHT: f64 = 1080.0;

/// Raw pixel position on the reference image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapPoint {
    /// Horizontal pixel offset from the image's left edge.
    pub x: f64,
    /// Vertical pixel offset from the image's top edge.
    pub y: f64,
}

/// Resolution-independent position: fractions of the reference image
/// size, clamped into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedPoint {
    /// Horizontal fraction in `[0, 1]`.
    pub x: f64,
    /// Vertical fraction in `[0, 1]`.
    pub y: f64,
}

impl MapPoint {
    /// Creates a raw pixel point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Normalizes against the reference image size.
    ///
    /// Out-of-frame pixels (negative, or beyond the reference bounds)
    /// clamp to the nearest edge rather than producing fractions
    /// outside `[0, 1]`.
    #[must_use]
    pub fn normalize(&self) -> NormalizedPoint {
        NormalizedPoint {
            x: (self.x / REFERENCE_WIDTH).clamp(0.0, 1.0),
            y: (self.y / REFERENCE_HEIGHT).clamp(0.0, 1.0),
        }
    }
}

impl NormalizedPoint {
    /// Re-projects onto a rendered image of `width` x `height` pixels.
    #[must_use]
    pub fn project(&self, width: f64, height: f64) -> MapPoint {
        MapPoint {
            x: self.x * width,
            y: self.y * height,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_center_to_half() {
        let p = MapPoint::new(REFERENCE_WIDTH / 2.0, REFERENCE_HEIGHT / 2.0);
        let n = p.normalize();
        assert!((n.x - 0.5).abs() < 1e-9);
        assert!((n.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn normalize_clamps_out_of_frame() {
        let n = MapPoint::new(-50.0, REFERENCE_HEIGHT * 2.0).normalize();
        assert_eq!(n.x, 0.0);
        assert_eq!(n.y, 1.0);
    }

    #[test]
    fn project_round_trips_within_frame() {
        let raw = MapPoint::new(480.0, 270.0);
        let back = raw.normalize().project(REFERENCE_WIDTH, REFERENCE_HEIGHT);
        assert!((back.x - raw.x).abs() < 1e-6);
        assert!((back.y - raw.y).abs() < 1e-6);
    }

    #[test]
    fn project_scales_to_rendered_size() {
        let n = MapPoint::new(960.0, 540.0).normalize();
        let rendered = n.project(800.0, 450.0);
        assert!((rendered.x - 400.0).abs() < 1e-6);
        assert!((rendered.y - 225.0).abs() < 1e-6);
    }
}

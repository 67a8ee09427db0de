//! Directional radius of an oriented ellipse and the border-to-border gap
//! between two ellipses along the line joining their centers
//!
//! The gap is a heuristic: each ellipse contributes its radius in the
//! direction of the other center, and the sum is subtracted from the center
//! distance. For eccentric, non-aligned ellipses this differs from the true
//! minimum distance; downstream tables depend on this exact arithmetic.

use crate::io::configuration::{COINCIDENT_CENTER_EPSILON, DEGENERATE_RADIUS_EPSILON};

/// Oriented ellipse described by its center, full axis lengths and angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Center x coordinate
    pub x: f64,
    /// Center y coordinate
    pub y: f64,
    /// Full major axis length
    pub major: f64,
    /// Full minor axis length
    pub minor: f64,
    /// Orientation of the major axis in degrees
    pub angle: f64,
}

impl Ellipse {
    /// Create an ellipse from its center, axis lengths and orientation
    pub const fn new(x: f64, y: f64, major: f64, minor: f64, angle: f64) -> Self {
        Self {
            x,
            y,
            major,
            minor,
            angle,
        }
    }

    /// Semi-major axis
    pub fn semi_major(&self) -> f64 {
        self.major / 2.0
    }

    /// Semi-minor axis
    pub fn semi_minor(&self) -> f64 {
        self.minor / 2.0
    }

    /// Euclidean distance between the two centers
    pub fn center_distance(&self, other: &Self) -> f64 {
        point_distance([self.x, self.y], [other.x, other.y])
    }

    /// Gap between this ellipse's border and `other`'s border
    ///
    /// Clamped to zero when the directional radii overlap, and zero for
    /// coincident centers.
    pub fn border_distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let center_distance = self.center_distance(other);

        if center_distance < COINCIDENT_CENTER_EPSILON {
            return 0.0;
        }

        let angle_to_other = dy.atan2(dx).to_degrees();

        let this_radius = radius_at(
            self.semi_major(),
            self.semi_minor(),
            angle_to_other - self.angle,
        );
        // Looking back from the other ellipse
        let other_radius = radius_at(
            other.semi_major(),
            other.semi_minor(),
            (angle_to_other + 180.0) - other.angle,
        );

        (center_distance - this_radius - other_radius).max(0.0)
    }
}

/// Euclidean distance between two points
// Plain sqrt, not hypot: distances must match the reference tables bit for bit
#[allow(clippy::suboptimal_flops, clippy::imprecise_flops)]
pub fn point_distance(from: [f64; 2], to: [f64; 2]) -> f64 {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    (dx * dx + dy * dy).sqrt()
}

/// Radius of an axis-aligned ellipse with semi-axes `a`, `b` at an angle in degrees
///
/// `r(t) = a·b / sqrt((b·cos t)² + (a·sin t)²)`. Returns `max(a, b)` when the
/// denominator is (nearly) zero, which covers `a = b = 0`.
#[allow(clippy::suboptimal_flops)]
pub fn radius_at(a: f64, b: f64, angle_degrees: f64) -> f64 {
    let theta = angle_degrees.to_radians();
    let b_cos = b * theta.cos();
    let a_sin = a * theta.sin();
    let denominator = (b_cos * b_cos + a_sin * a_sin).sqrt();

    if denominator < DEGENERATE_RADIUS_EPSILON {
        return a.max(b);
    }

    (a * b) / denominator
}

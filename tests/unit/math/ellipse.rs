//! Tests for directional ellipse radius and border-to-border distance

#[cfg(test)]
mod tests {
    use histospatial::math::ellipse::{Ellipse, point_distance, radius_at};

    const TOLERANCE: f64 = 1e-9;

    // Two circles of diameter 4, ten apart, leave a gap of 10 - 2 - 2
    #[test]
    fn test_circles_border_distance() {
        let a = Ellipse::new(0.0, 0.0, 4.0, 4.0, 0.0);
        let b = Ellipse::new(10.0, 0.0, 4.0, 4.0, 0.0);

        assert!((a.center_distance(&b) - 10.0).abs() < TOLERANCE);
        assert!((a.border_distance(&b) - 6.0).abs() < TOLERANCE);
        assert!((b.border_distance(&a) - 6.0).abs() < TOLERANCE);
    }

    // Coincident centers give zero no matter how large the ellipses are
    #[test]
    fn test_coincident_centers() {
        let a = Ellipse::new(5.0, 5.0, 20.0, 10.0, 30.0);
        let b = Ellipse::new(5.0005, 5.0, 2.0, 2.0, 0.0);

        assert!(a.border_distance(&b).abs() < f64::EPSILON);
    }

    // Overlapping directional radii clamp to zero instead of going negative
    #[test]
    fn test_overlap_clamps_to_zero() {
        let a = Ellipse::new(0.0, 0.0, 4.0, 4.0, 0.0);
        let b = Ellipse::new(3.0, 0.0, 4.0, 4.0, 0.0);

        assert!(a.border_distance(&b).abs() < f64::EPSILON);
    }

    // Zero axes (missing fit) reduce the border distance to the center distance
    #[test]
    fn test_degenerate_axes_fall_back_to_center_distance() {
        let a = Ellipse::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let b = Ellipse::new(3.0, 4.0, 0.0, 0.0, 0.0);

        assert!((a.border_distance(&b) - 5.0).abs() < TOLERANCE);
    }

    // An ellipse turned 90 degrees shows its minor semi-axis along x
    #[test]
    fn test_orientation_changes_radius() {
        let upright = Ellipse::new(0.0, 0.0, 10.0, 4.0, 90.0);
        let flat = Ellipse::new(0.0, 0.0, 10.0, 4.0, 0.0);
        let point = Ellipse::new(20.0, 0.0, 0.0, 0.0, 0.0);

        assert!((upright.border_distance(&point) - 18.0).abs() < TOLERANCE);
        assert!((flat.border_distance(&point) - 15.0).abs() < TOLERANCE);
    }

    // Radius along the major and minor axes equals the semi-axes
    #[test]
    fn test_radius_at_axes() {
        assert!((radius_at(3.0, 1.0, 0.0) - 3.0).abs() < TOLERANCE);
        assert!((radius_at(3.0, 1.0, 90.0) - 1.0).abs() < TOLERANCE);
        assert!((radius_at(3.0, 1.0, 180.0) - 3.0).abs() < TOLERANCE);
    }

    // Degenerate denominator returns the larger semi-axis
    #[test]
    fn test_radius_at_degenerate() {
        assert!(radius_at(0.0, 0.0, 45.0).abs() < f64::EPSILON);
        // Zero minor axis along the major axis also hits the fallback
        assert!((radius_at(2.0, 0.0, 0.0) - 2.0).abs() < TOLERANCE);
    }

    // Point distance is plain Euclidean distance
    #[test]
    fn test_point_distance() {
        assert!((point_distance([0.0, 0.0], [50.0, 50.0]) - 5000.0_f64.sqrt()).abs() < TOLERANCE);
        assert!(point_distance([1.0, 1.0], [1.0, 1.0]).abs() < f64::EPSILON);
    }

    // Border distance is never negative for a spread of shapes and angles
    #[test]
    fn test_border_distance_non_negative() {
        for step in 0..36 {
            let angle = f64::from(step) * 10.0;
            let a = Ellipse::new(0.0, 0.0, 12.0, 3.0, angle);
            let b = Ellipse::new(4.0, 2.0, 8.0, 8.0, 180.0 - angle);
            assert!(a.border_distance(&b) >= 0.0);
        }
    }
}

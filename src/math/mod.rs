//! Closed-form geometry used by the relationship calculator and shape descriptors

/// Directional ellipse radius and border-to-border distance
pub mod ellipse;
/// Convex hull construction and polygon area
pub mod hull;

//! Convex hull and polygon area helpers for solidity

use geo::{Area, ConvexHull, LineString, MultiPoint, Point, Polygon};

/// Area of a simple polygon
///
/// Vertex order may be clockwise or counter-clockwise. Fewer than three
/// vertices give zero.
pub fn polygon_area(points: &[[f64; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    Polygon::new(LineString::from(points.to_vec()), vec![]).unsigned_area()
}

/// Convex hull of a point set
///
/// Returns the hull in counter-clockwise order without repeating the first
/// vertex. Non-finite points are ignored; fewer than three finite points
/// give an empty hull.
pub fn convex_hull(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let Some(hull) = hull_polygon(points) else {
        return Vec::new();
    };

    let mut vertices: Vec<[f64; 2]> = hull.exterior().coords().map(|c| [c.x, c.y]).collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// Area enclosed by the convex hull of a boundary polygon
pub fn convex_hull_area(boundary: &[[f64; 2]]) -> f64 {
    hull_polygon(boundary).map_or(0.0, |hull| hull.unsigned_area())
}

fn hull_polygon(points: &[[f64; 2]]) -> Option<Polygon<f64>> {
    let finite: Vec<Point<f64>> = points
        .iter()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .map(|&p| Point::from(p))
        .collect();

    if finite.len() < 3 {
        return None;
    }
    Some(MultiPoint::new(finite).convex_hull())
}

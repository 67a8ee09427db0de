//! Spatial data structures for proximity search
//!
//! A uniform grid limits nearest-vessel and neighbour searches to the
//! buckets around a query point instead of comparing all pairs.

/// Uniform grid spatial index
pub mod grid;

pub use grid::SpatialGrid;

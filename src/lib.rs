//! Spatial relationship and aggregation engine for segmented tissue objects
//!
//! Nuclei, cytoplasm regions, whole cells and vessels are loaded per image.
//! Every nucleus gets its nearest vessel, its neighbour count and its
//! closest neighbour measured border to border on fitted ellipses. The
//! cytoplasm and cell sharing its number inherit those metrics, and the
//! whole image is tabulated in a fixed order with group-wise averages.

#![forbid(unsafe_code)]

/// Relationship search, caching and the per-image measurement pass
pub mod algorithm;
/// Output ordering, measurement rows and group averages
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Ellipse and convex hull geometry
pub mod math;
/// Object records, identifiers and the per-image registry
pub mod model;
/// Uniform grid spatial index
pub mod spatial;

pub use io::error::{MeasurementError, Result};

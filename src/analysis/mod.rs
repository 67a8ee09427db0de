//! Aggregation of per-object measurements into ordered rows and group averages

/// Group-wise column means over measurement rows
pub mod averages;
/// Per-object measurement rows and shape descriptors
pub mod measurement;
/// Deterministic output order of an image's objects
pub mod ordering;

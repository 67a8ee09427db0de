//! Typed records for segmented objects and the per-image registry

/// Object types and identifier parsing
pub mod identifier;
/// Geometry, intensity and border status of one object
pub mod object;
/// Per-image object store with lazily built spatial indices
pub mod registry;

pub use identifier::{ObjectName, ObjectType};
pub use object::{Category, SegmentedObject};
pub use registry::Registry;

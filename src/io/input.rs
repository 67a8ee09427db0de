//! JSON object lists produced by the segmentation stage
//!
//! One document per image: `{ "objects": [ ... ] }`. Each record carries the
//! identifier, optional explicit type and border flag, the finalised geometry
//! and per-channel intensity statistics. Identifiers are parsed here and
//! nowhere else.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::io::error::{MeasurementError, Result, WithPath, invalid_source};
use crate::model::identifier::{ObjectName, ObjectType};
use crate::model::object::{Channels, Geometry, SegmentedObject};

/// Top-level input document of one image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageInput {
    /// Object records in encounter order
    pub objects: Vec<ObjectRecord>,
}

/// One object as written by the segmentation stage
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectRecord {
    /// Identifier such as `Nucleus_17_Border`
    pub name: String,
    /// Explicit type for identifiers without a known prefix
    #[serde(default)]
    pub kind: Option<ObjectType>,
    /// Explicit border flag, overriding the identifier suffix
    #[serde(default)]
    pub border: Option<bool>,
    /// Shape measurements
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Intensity measurements
    #[serde(flatten)]
    pub channels: Channels,
}

/// Read and normalise the objects of one image
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid object list,
/// or contains a record that cannot be typed or placed
pub fn load_objects(path: &Path) -> Result<Vec<SegmentedObject>> {
    let text = std::fs::read_to_string(path).with_path(path, "read object list")?;
    let input: ImageInput =
        serde_json::from_str(&text).map_err(|source| MeasurementError::InputLoad {
            path: path.to_path_buf(),
            source,
        })?;
    objects_from_input(input)
}

/// Normalise parsed records into typed objects
///
/// # Errors
///
/// Returns an error for a record with an unknown prefix and no `kind`, or
/// with a non-finite centroid
pub fn objects_from_input(input: ImageInput) -> Result<Vec<SegmentedObject>> {
    input.objects.into_iter().map(normalize_record).collect()
}

/// Type one record and bring its geometry into canonical form
///
/// Swaps axes when `minor > major`, wraps the angle into `[0, 180)` and
/// drops non-finite ellipse values.
///
/// # Errors
///
/// Returns an error when the record cannot be typed or has no usable centroid
pub fn normalize_record(record: ObjectRecord) -> Result<SegmentedObject> {
    let ObjectRecord {
        name,
        kind,
        border,
        mut geometry,
        channels,
    } = record;

    if !geometry.centroid.iter().all(|c| c.is_finite()) {
        warn!(object = %name, "rejecting object with non-finite centroid");
        return Err(invalid_source(&format!(
            "object '{name}' has a non-finite centroid"
        )));
    }

    for (label, value) in [
        ("major", &mut geometry.major),
        ("minor", &mut geometry.minor),
        ("angle", &mut geometry.angle),
    ] {
        if value.is_some_and(|v| !v.is_finite()) {
            warn!(object = %name, field = label, "dropping non-finite ellipse value");
            *value = None;
        }
    }

    if let (Some(major), Some(minor)) = (geometry.major, geometry.minor)
        && minor > major
    {
        warn!(object = %name, major, minor, "swapping ellipse axes");
        geometry.major = Some(minor);
        geometry.minor = Some(major);
    }

    if let Some(angle) = geometry.angle
        && !(0.0..180.0).contains(&angle)
    {
        let wrapped = angle.rem_euclid(180.0);
        // rem_euclid can round up to the modulus itself
        let wrapped = if wrapped >= 180.0 { 0.0 } else { wrapped };
        warn!(object = %name, angle, wrapped, "wrapping ellipse angle");
        geometry.angle = Some(wrapped);
    }

    let parsed = ObjectName::parse(&name);
    SegmentedObject::new(parsed, kind, border, geometry, channels).ok_or_else(|| {
        invalid_source(&format!(
            "object '{name}' has no recognised prefix and no explicit kind"
        ))
    })
}

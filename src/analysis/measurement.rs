//! Per-object measurement rows and derived shape descriptors
//!
//! A row holds every numeric column of the per-object table as `f64`, with
//! `NaN` standing for an absent value. The same vector feeds the group
//! averages, so both tables share one column layout.

use std::f64::consts::PI;

use crate::algorithm::relationship::RelationshipRecord;
use crate::io::configuration::{PRIMARY_STAIN_PREFIX, SECONDARY_STAIN_PREFIX};
use crate::io::table::{Field, Table};
use crate::math::hull::convex_hull_area;
use crate::model::identifier::ObjectType;
use crate::model::object::{Category, IntensityStats, SegmentedObject};

/// Relationship columns that are numeric
pub const RELATIONSHIP_COLUMNS: [&str; 3] =
    ["Vessel Distance", "Neighbor Count", "Closest Neighbor Distance"];

/// Geometry and shape descriptor columns
pub const SHAPE_COLUMNS: [&str; 23] = [
    "Area",
    "X",
    "Y",
    "XM",
    "YM",
    "Perim.",
    "BX",
    "BY",
    "Width",
    "Height",
    "Major",
    "Minor",
    "Angle",
    "Circ.",
    "IntDen",
    "Feret",
    "FeretX",
    "FeretY",
    "FeretAngle",
    "MinFeret",
    "AR",
    "Round",
    "Solidity",
];

/// Intensity statistic columns, prefixed for stain channels
pub const INTENSITY_COLUMNS: [&str; 8] = [
    "Mean", "StdDev", "Mode", "Min", "Max", "Median", "Skew", "Kurt",
];

/// Which optional column groups an image's tables carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    stain_prefixes: Option<[String; 2]>,
}

impl ColumnLayout {
    /// Layout with the base channel only
    pub const fn base_only() -> Self {
        Self {
            stain_prefixes: None,
        }
    }

    /// Layout with two stain channels under the given column prefixes
    pub fn with_stains(primary: &str, secondary: &str) -> Self {
        Self {
            stain_prefixes: Some([primary.to_string(), secondary.to_string()]),
        }
    }

    /// Layout for an image: stain columns appear when any object has a stain channel
    pub fn for_objects(objects: &[SegmentedObject]) -> Self {
        if objects.iter().any(|object| object.channels.has_stains()) {
            Self::with_stains(PRIMARY_STAIN_PREFIX, SECONDARY_STAIN_PREFIX)
        } else {
            Self::base_only()
        }
    }

    /// Whether stain columns are present
    pub const fn has_stains(&self) -> bool {
        self.stain_prefixes.is_some()
    }

    /// Headers of the numeric value vector, in order
    pub fn numeric_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = RELATIONSHIP_COLUMNS
            .iter()
            .chain(SHAPE_COLUMNS.iter())
            .chain(INTENSITY_COLUMNS.iter())
            .map(ToString::to_string)
            .collect();

        if let Some(prefixes) = &self.stain_prefixes {
            for prefix in prefixes {
                headers.extend(
                    INTENSITY_COLUMNS
                        .iter()
                        .map(|column| format!("{prefix}_{column}")),
                );
            }
        }

        headers
    }

    /// Number of entries in a row's value vector
    pub fn numeric_width(&self) -> usize {
        let stains = if self.has_stains() {
            2 * INTENSITY_COLUMNS.len()
        } else {
            0
        };
        RELATIONSHIP_COLUMNS.len() + SHAPE_COLUMNS.len() + INTENSITY_COLUMNS.len() + stains
    }

    /// Headers of the per-object table
    pub fn object_headers(&self) -> Vec<String> {
        let numeric = self.numeric_headers();
        let mut headers = vec![
            "ROI".to_string(),
            "Vessel Distance".to_string(),
            "Closest Vessel".to_string(),
            "Neighbor Count".to_string(),
            "Closest Neighbor Distance".to_string(),
            "Closest Neighbor".to_string(),
        ];
        headers.extend(numeric.into_iter().skip(RELATIONSHIP_COLUMNS.len()));
        headers
    }
}

/// Measurements of one object, ready for tabulation and averaging
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Identifier text
    pub id: String,
    /// Object type
    pub kind: ObjectType,
    /// Central or border
    pub category: Category,
    /// Relationship metrics, own or inherited from the nucleus
    pub relationship: RelationshipRecord,
    /// Numeric columns in [`ColumnLayout::numeric_headers`] order; `NaN` is absent
    pub values: Vec<f64>,
}

impl MeasurementRow {
    /// Measure an object under a column layout
    pub fn new(
        object: &SegmentedObject,
        relationship: RelationshipRecord,
        layout: &ColumnLayout,
    ) -> Self {
        let geometry = &object.geometry;
        let base = object.channels.base.unwrap_or_default();
        let mean = base.mean;
        let [com_x, com_y] = geometry
            .center_of_mass
            .map_or([None, None], |[x, y]| [Some(x), Some(y)]);

        let mut values: Vec<Option<f64>> = Vec::with_capacity(layout.numeric_width());
        values.extend([
            relationship.vessel_distance(),
            Some(f64::from(relationship.neighbor_count)),
            relationship.closest_neighbor_distance(),
        ]);
        values.extend([
            Some(geometry.area),
            Some(geometry.centroid[0]),
            Some(geometry.centroid[1]),
            com_x,
            com_y,
            Some(geometry.perimeter),
            geometry.bounds.map(|b| b.x),
            geometry.bounds.map(|b| b.y),
            geometry.bounds.map(|b| b.width),
            geometry.bounds.map(|b| b.height),
            geometry.major,
            geometry.minor,
            geometry.angle,
            circularity(geometry.area, geometry.perimeter),
            mean.map(|mean| geometry.area * mean),
            geometry.feret.map(|f| f.diameter),
            geometry.feret.map(|f| f.x),
            geometry.feret.map(|f| f.y),
            geometry.feret.map(|f| f.angle),
            geometry.feret.map(|f| f.min),
            geometry
                .major
                .zip(geometry.minor)
                .and_then(|(major, minor)| aspect_ratio(major, minor)),
            geometry
                .major
                .and_then(|major| roundness(geometry.area, major)),
            object_solidity(object),
        ]);
        values.extend(base.values());

        if layout.has_stains() {
            let empty = IntensityStats::default();
            values.extend(object.channels.primary.unwrap_or(empty).values());
            values.extend(object.channels.secondary.unwrap_or(empty).values());
        }

        Self {
            id: object.id().to_string(),
            kind: object.kind,
            category: object.category(),
            relationship,
            values: values
                .into_iter()
                .map(|value| value.filter(|v| v.is_finite()).unwrap_or(f64::NAN))
                .collect(),
        }
    }

    /// Cells of this row in per-object table order
    pub fn fields(&self) -> Vec<Field> {
        let relationship = &self.relationship;
        let mut fields = vec![
            Field::Text(self.id.clone()),
            Field::Number(relationship.vessel_distance().unwrap_or(f64::NAN)),
            Field::text_or_absent(relationship.closest_vessel_id()),
            Field::Count(u64::from(relationship.neighbor_count)),
            Field::Number(relationship.closest_neighbor_distance().unwrap_or(f64::NAN)),
            Field::text_or_absent(relationship.closest_neighbor_id()),
        ];
        fields.extend(
            self.values
                .iter()
                .skip(RELATIONSHIP_COLUMNS.len())
                .map(|&value| Field::Number(value)),
        );
        fields
    }
}

/// Per-object table in the given row order
pub fn object_table(rows: &[MeasurementRow], layout: &ColumnLayout) -> Table {
    let mut table = Table::new(layout.object_headers());
    for row in rows {
        table.push_row(row.fields());
    }
    table
}

/// `4π·area / perimeter²`
pub fn circularity(area: f64, perimeter: f64) -> Option<f64> {
    finite((4.0 * PI * area) / (perimeter * perimeter))
}

/// `major / minor`
pub fn aspect_ratio(major: f64, minor: f64) -> Option<f64> {
    finite(major / minor)
}

/// `4·area / (π·major²)`
pub fn roundness(area: f64, major: f64) -> Option<f64> {
    finite((4.0 * area) / (PI * major * major))
}

/// `area / convex hull area`, or 1 for a degenerate (zero-area) hull
pub fn solidity(area: f64, hull_area: f64) -> Option<f64> {
    if hull_area > 0.0 {
        finite(area / hull_area)
    } else {
        Some(1.0)
    }
}

/// Solidity from the boundary polygon's hull, else from a precomputed hull area
fn object_solidity(object: &SegmentedObject) -> Option<f64> {
    let geometry = &object.geometry;
    let hull_area = match &geometry.boundary {
        Some(boundary) if !boundary.is_empty() => Some(convex_hull_area(boundary)),
        _ => geometry.convex_hull_area,
    };
    hull_area.and_then(|hull| solidity(geometry.area, hull))
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

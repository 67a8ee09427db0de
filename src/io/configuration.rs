//! Engine constants and per-image runtime configuration

use crate::io::error::{Result, invalid_parameter};

/// Default edge length of a spatial grid cell (same units as centroids)
pub const DEFAULT_GRID_CELL_SIZE: f64 = 100.0;

/// Default radius within which two nuclei count as neighbours
pub const DEFAULT_NEIGHBOR_RADIUS: f64 = 50.0;

/// Ring radius (in grid cells) for the first nearest-vessel query
pub const VESSEL_SEARCH_RING: i32 = 2;

// Below this, two centers are treated as coincident
/// Center distance under which the border distance is zero
pub const COINCIDENT_CENTER_EPSILON: f64 = 0.001;

/// Denominator under which the ellipse radius falls back to the larger semi-axis
pub const DEGENERATE_RADIUS_EPSILON: f64 = 0.001;

// Output settings
/// Digits after the decimal point before trailing zeros are stripped
pub const NUMBER_PRECISION: usize = 6;
/// Literal written in place of an absent value
pub const ABSENT_MARKER: &str = "N/A";
/// Column prefix for the primary stain channel
pub const PRIMARY_STAIN_PREFIX: &str = "Hema";
/// Column prefix for the secondary stain channel
pub const SECONDARY_STAIN_PREFIX: &str = "Eosin";

/// Sub-directory receiving per-object tables
pub const INDIVIDUAL_DIR: &str = "individual";
/// Sub-directory receiving group-average tables
pub const AVERAGES_DIR: &str = "averages";
/// Suffix of the per-object table file name
pub const INDIVIDUAL_SUFFIX: &str = "_data.csv";
/// Suffix of the group-average table file name
pub const AVERAGES_SUFFIX: &str = "_averages.csv";
/// Extension of accepted input documents
pub const INPUT_EXTENSION: &str = "json";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Per-image bars shown at once before older ones are recycled
pub const MAX_IMAGE_PROGRESS_BARS: usize = 4;

/// Parameters for one image's measurement pass
///
/// Passed explicitly into the registry, the relationship calculator and the
/// aggregator; nothing reads process-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum center-to-center distance for a neighbouring nucleus
    pub neighbor_radius: f64,
    /// Edge length of a spatial index cell
    pub grid_cell_size: f64,
    /// Drop border-flagged vessels from vessel search and vessel groups
    pub ignore_border_vessels: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            grid_cell_size: DEFAULT_GRID_CELL_SIZE,
            ignore_border_vessels: false,
        }
    }
}

impl EngineConfig {
    /// Check that radius and cell size are usable
    ///
    /// # Errors
    ///
    /// Returns an error if the neighbour radius is negative or not finite, or
    /// if the grid cell size is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        if !self.neighbor_radius.is_finite() || self.neighbor_radius < 0.0 {
            return Err(invalid_parameter(
                "neighbor_radius",
                &self.neighbor_radius,
                &"must be a finite, non-negative length",
            ));
        }
        if !self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0 {
            return Err(invalid_parameter(
                "grid_cell_size",
                &self.grid_cell_size,
                &"must be a finite, positive length",
            ));
        }
        Ok(())
    }

    /// Ring radius (in cells) that covers the whole neighbour radius
    pub fn neighbor_ring(&self) -> i32 {
        crate::spatial::grid::ring_covering(self.neighbor_radius, self.grid_cell_size)
    }
}

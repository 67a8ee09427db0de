//! Segmented object records: geometry, intensity statistics and border status

use serde::Deserialize;

use crate::math::ellipse::Ellipse;
use crate::model::identifier::{ObjectName, ObjectType};

/// Central or border position of an object, as assigned upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Does not touch the image edge
    Central,
    /// Touches the image edge
    Border,
}

impl Category {
    /// Category for a border flag
    pub const fn from_border(border: bool) -> Self {
        if border { Self::Border } else { Self::Central }
    }
}

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Rectangle width
    pub width: f64,
    /// Rectangle height
    pub height: f64,
}

/// Feret (caliper) measurements
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Feret {
    /// Maximum caliper diameter
    pub diameter: f64,
    /// Angle of the maximum diameter in degrees
    pub angle: f64,
    /// Minimum caliper diameter
    pub min: f64,
    /// X coordinate of the maximum diameter's start point
    pub x: f64,
    /// Y coordinate of the maximum diameter's start point
    pub y: f64,
}

/// Finalised geometry of one object
///
/// Only area, perimeter and centroid are mandatory; everything else is
/// reported as absent when missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    /// Enclosed area
    pub area: f64,
    /// Boundary length
    pub perimeter: f64,
    /// Geometric center `[x, y]`
    pub centroid: [f64; 2],
    /// Intensity-weighted center `[x, y]`
    #[serde(default)]
    pub center_of_mass: Option<[f64; 2]>,
    /// Bounding rectangle
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// Full major axis of the fitted ellipse
    #[serde(default)]
    pub major: Option<f64>,
    /// Full minor axis of the fitted ellipse
    #[serde(default)]
    pub minor: Option<f64>,
    /// Orientation of the major axis in degrees, `[0, 180)`
    #[serde(default)]
    pub angle: Option<f64>,
    /// Feret diameters
    #[serde(default)]
    pub feret: Option<Feret>,
    /// Precomputed convex hull area, used when no boundary is given
    #[serde(default)]
    pub convex_hull_area: Option<f64>,
    /// Boundary polygon vertices
    #[serde(default)]
    pub boundary: Option<Vec<[f64; 2]>>,
}

impl Geometry {
    /// Geometry with only the mandatory fields set
    pub const fn new(area: f64, perimeter: f64, centroid: [f64; 2]) -> Self {
        Self {
            area,
            perimeter,
            centroid,
            center_of_mass: None,
            bounds: None,
            major: None,
            minor: None,
            angle: None,
            feret: None,
            convex_hull_area: None,
            boundary: None,
        }
    }
}

/// Per-channel intensity statistics; each value may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntensityStats {
    /// Mean intensity
    pub mean: Option<f64>,
    /// Standard deviation
    pub std_dev: Option<f64>,
    /// Modal intensity
    pub mode: Option<f64>,
    /// Minimum intensity
    pub min: Option<f64>,
    /// Maximum intensity
    pub max: Option<f64>,
    /// Median intensity
    pub median: Option<f64>,
    /// Skewness of the intensity distribution
    pub skewness: Option<f64>,
    /// Kurtosis of the intensity distribution
    pub kurtosis: Option<f64>,
}

impl IntensityStats {
    /// Statistics in column order: mean, std dev, mode, min, max, median, skew, kurtosis
    pub const fn values(&self) -> [Option<f64>; 8] {
        [
            self.mean,
            self.std_dev,
            self.mode,
            self.min,
            self.max,
            self.median,
            self.skewness,
            self.kurtosis,
        ]
    }
}

/// Intensity statistics for the measured channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Channels {
    /// Original image channel
    pub base: Option<IntensityStats>,
    /// First separated stain (hematoxylin)
    pub primary: Option<IntensityStats>,
    /// Second separated stain (eosin)
    pub secondary: Option<IntensityStats>,
}

impl Channels {
    /// Whether any separated stain channel is present
    pub const fn has_stains(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }
}

/// One segmented object of an image
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedObject {
    /// Parsed identifier
    pub name: ObjectName,
    /// Object type, fixed at ingestion
    pub kind: ObjectType,
    /// Touches the image edge
    pub border: bool,
    /// Shape measurements
    pub geometry: Geometry,
    /// Intensity measurements
    pub channels: Channels,
}

impl SegmentedObject {
    /// Create an object from a parsed identifier
    ///
    /// The type comes from the identifier prefix when it has one, else from
    /// `kind`. Returns `None` when neither is available. The border flag
    /// defaults to the identifier's `_Border` suffix; legacy `Border_`
    /// identifiers without it are central.
    pub fn new(
        name: ObjectName,
        kind: Option<ObjectType>,
        border: Option<bool>,
        geometry: Geometry,
        channels: Channels,
    ) -> Option<Self> {
        let kind = name.prefix().map(|prefix| prefix.object_type()).or(kind)?;
        let border = border.unwrap_or_else(|| name.has_border_suffix());

        Some(Self {
            name,
            kind,
            border,
            geometry,
            channels,
        })
    }

    /// Object with the given identifier and centroid and no other measurements
    ///
    /// Returns `None` for identifiers without a recognised prefix.
    pub fn at(name: &str, x: f64, y: f64) -> Option<Self> {
        Self::new(
            ObjectName::parse(name),
            None,
            None,
            Geometry::new(0.0, 0.0, [x, y]),
            Channels::default(),
        )
    }

    /// Replace the fitted ellipse
    #[must_use]
    pub fn with_ellipse(mut self, major: f64, minor: f64, angle: f64) -> Self {
        self.geometry.major = Some(major);
        self.geometry.minor = Some(minor);
        self.geometry.angle = Some(angle);
        self
    }

    /// Replace area and perimeter
    #[must_use]
    pub fn with_size(mut self, area: f64, perimeter: f64) -> Self {
        self.geometry.area = area;
        self.geometry.perimeter = perimeter;
        self
    }

    /// Replace the base channel statistics
    #[must_use]
    pub fn with_base_channel(mut self, stats: IntensityStats) -> Self {
        self.channels.base = Some(stats);
        self
    }

    /// Override the border flag
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Identifier text
    pub fn id(&self) -> &str {
        self.name.as_str()
    }

    /// Centroid x
    pub const fn x(&self) -> f64 {
        self.geometry.centroid[0]
    }

    /// Centroid y
    pub const fn y(&self) -> f64 {
        self.geometry.centroid[1]
    }

    /// Central or border
    pub const fn category(&self) -> Category {
        Category::from_border(self.border)
    }

    /// Fitted ellipse, with missing axes or angle treated as zero
    pub fn ellipse(&self) -> Ellipse {
        Ellipse::new(
            self.x(),
            self.y(),
            self.geometry.major.unwrap_or(0.0),
            self.geometry.minor.unwrap_or(0.0),
            self.geometry.angle.unwrap_or(0.0),
        )
    }
}

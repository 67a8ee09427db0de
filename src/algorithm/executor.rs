use tracing::{debug, info};

use crate::{
    algorithm::relationship::RelationshipCalculator,
    analysis::averages::{averages_table, group_averages},
    analysis::measurement::{ColumnLayout, MeasurementRow, object_table},
    analysis::ordering::order_objects,
    io::configuration::EngineConfig,
    io::error::Result,
    io::table::Table,
    model::object::SegmentedObject,
    model::registry::Registry,
};

/// Both output tables of one image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    /// Measurement rows in output order
    pub rows: Vec<MeasurementRow>,
    /// Per-object table
    pub objects: Table,
    /// Group-average table
    pub averages: Table,
}

/// One image's measurement pass, advanced one object at a time
///
/// Objects are visited in output order. Callers may stop between
/// iterations; [`MeasurementPass::finish`] completes whatever is left.
#[derive(Debug)]
pub struct MeasurementPass<'a> {
    calculator: RelationshipCalculator<'a>,
    layout: ColumnLayout,
    order: Vec<usize>,
    cursor: usize,
    rows: Vec<MeasurementRow>,
}

impl<'a> MeasurementPass<'a> {
    /// Prepare a pass over every object of the registry
    pub fn new(registry: &'a Registry) -> Self {
        let config = registry.config();
        info!(
            objects = registry.len(),
            neighbor_radius = config.neighbor_radius,
            grid_cell_size = config.grid_cell_size,
            ignore_border_vessels = config.ignore_border_vessels,
            "starting measurement pass"
        );

        let order = order_objects(registry.objects());
        Self {
            calculator: RelationshipCalculator::new(registry),
            layout: ColumnLayout::for_objects(registry.objects()),
            rows: Vec::with_capacity(order.len()),
            order,
            cursor: 0,
        }
    }

    /// Total number of objects in the pass
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the image has no objects
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of objects measured so far
    pub const fn processed(&self) -> usize {
        self.cursor
    }

    /// Column layout of this image's tables
    pub const fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Measure the next object in output order
    ///
    /// Returns `false` once every object has been measured.
    pub fn execute_iteration(&mut self) -> bool {
        let Some(&position) = self.order.get(self.cursor) else {
            return false;
        };
        self.cursor += 1;

        let registry = self.calculator.registry();
        if let Some(object) = registry.get(position) {
            let relationship = self.calculator.relationship_for(position);
            self.rows
                .push(MeasurementRow::new(object, relationship, &self.layout));
        }
        true
    }

    /// Measure any remaining objects and build both tables
    pub fn finish(mut self) -> ImageReport {
        while self.execute_iteration() {}

        let stats = self.calculator.cache_stats();
        debug!(
            hits = stats.hits,
            misses = stats.misses,
            "relationship cache statistics"
        );

        let ignore_border_vessels = self.calculator.registry().config().ignore_border_vessels;
        let averages = group_averages(&self.rows, ignore_border_vessels);

        ImageReport {
            objects: object_table(&self.rows, &self.layout),
            averages: averages_table(&averages, &self.layout),
            rows: self.rows,
        }
    }
}

/// Run a complete pass over one image's objects
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn measure_image(objects: Vec<SegmentedObject>, config: EngineConfig) -> Result<ImageReport> {
    config.validate()?;
    let registry = Registry::new(objects, config);
    Ok(MeasurementPass::new(&registry).finish())
}

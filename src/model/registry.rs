//! Per-image object registry with lazily built spatial indices
//!
//! The registry owns every object of one image. The vessel and nucleus
//! indices are built on first use and live until the registry is dropped at
//! the end of the image's pass.

use std::cell::OnceCell;
use std::collections::HashMap;

use tracing::debug;

use crate::io::configuration::EngineConfig;
use crate::model::identifier::ObjectType;
use crate::model::object::SegmentedObject;
use crate::spatial::grid::SpatialGrid;

/// Objects of one image plus the indices built over them
///
/// Index entries are positions into [`Registry::objects`].
#[derive(Debug)]
pub struct Registry {
    config: EngineConfig,
    objects: Vec<SegmentedObject>,
    nucleus_by_number: HashMap<u32, usize>,
    vessel_index: OnceCell<SpatialGrid<usize>>,
    nucleus_index: OnceCell<SpatialGrid<usize>>,
}

impl Registry {
    /// Register an image's objects in encounter order
    pub fn new(objects: Vec<SegmentedObject>, config: EngineConfig) -> Self {
        let mut nucleus_by_number = HashMap::new();
        for (position, object) in objects.iter().enumerate() {
            if object.kind != ObjectType::Nucleus {
                continue;
            }
            if let Some(number) = object.name.number() {
                // First nucleus carrying a number owns it
                nucleus_by_number.entry(number).or_insert(position);
            }
        }

        Self {
            config,
            objects,
            nucleus_by_number,
            vessel_index: OnceCell::new(),
            nucleus_index: OnceCell::new(),
        }
    }

    /// Configuration this registry was built with
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All objects in encounter order
    pub fn objects(&self) -> &[SegmentedObject] {
        &self.objects
    }

    /// Object at a registry position
    pub fn get(&self, position: usize) -> Option<&SegmentedObject> {
        self.objects.get(position)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the image has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Position of the nucleus sharing a triplet number
    pub fn nucleus_for(&self, number: u32) -> Option<usize> {
        self.nucleus_by_number.get(&number).copied()
    }

    /// Whether an object takes part in nearest-vessel searches
    ///
    /// Only `Vessel_` objects qualify; legacy `Border_` objects never do, and
    /// border vessels are dropped when `ignore_border_vessels` is set.
    pub fn is_vessel_candidate(&self, object: &SegmentedObject) -> bool {
        object.kind == ObjectType::Vessel
            && !object.name.is_legacy_border()
            && !(self.config.ignore_border_vessels && object.border)
    }

    /// Grid over vessel search candidates, built on first call
    pub fn vessel_index(&self) -> &SpatialGrid<usize> {
        self.vessel_index.get_or_init(|| {
            let index = self.build_index(|object| self.is_vessel_candidate(object));
            debug!(vessels = index.len(), "built vessel index");
            index
        })
    }

    /// Grid over all nuclei, built on first call
    pub fn nucleus_index(&self) -> &SpatialGrid<usize> {
        self.nucleus_index.get_or_init(|| {
            let index = self.build_index(|object| object.kind == ObjectType::Nucleus);
            debug!(nuclei = index.len(), "built nucleus index");
            index
        })
    }

    fn build_index(&self, include: impl Fn(&SegmentedObject) -> bool) -> SpatialGrid<usize> {
        let mut index = SpatialGrid::new(self.config.grid_cell_size);
        for (position, object) in self.objects.iter().enumerate() {
            if include(object) {
                index.insert(object.x(), object.y(), position);
            }
        }
        index
    }
}

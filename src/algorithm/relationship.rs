//! Nearest-vessel and nearest-neighbour relationships
//!
//! Relationship metrics belong to nuclei. A nucleus is measured once per
//! image pass and the record is reused for the cytoplasm and cell sharing its
//! number. Vessels, and triplet members without a usable number, only get
//! their own nearest-vessel distance.

use tracing::debug;

use crate::algorithm::cache::{CacheStats, RelationshipCache};
use crate::io::configuration::VESSEL_SEARCH_RING;
use crate::math::ellipse::point_distance;
use crate::model::identifier::ObjectType;
use crate::model::registry::Registry;

/// Closest object found by a search
#[derive(Debug, Clone, PartialEq)]
pub struct Nearest {
    /// Identifier of the closest object
    pub id: String,
    /// Distance to it
    pub distance: f64,
}

/// Spatial relationship metrics of one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipRecord {
    /// Closest vessel by center distance
    pub vessel: Option<Nearest>,
    /// Nuclei whose centers lie within the neighbour radius
    pub neighbor_count: u32,
    /// Closest of those neighbours by border distance
    pub closest_neighbor: Option<Nearest>,
}

impl RelationshipRecord {
    /// Distance to the closest vessel
    pub fn vessel_distance(&self) -> Option<f64> {
        self.vessel.as_ref().map(|nearest| nearest.distance)
    }

    /// Identifier of the closest vessel
    pub fn closest_vessel_id(&self) -> Option<&str> {
        self.vessel.as_ref().map(|nearest| nearest.id.as_str())
    }

    /// Border distance to the closest neighbouring nucleus
    pub fn closest_neighbor_distance(&self) -> Option<f64> {
        self.closest_neighbor.as_ref().map(|nearest| nearest.distance)
    }

    /// Identifier of the closest neighbouring nucleus
    pub fn closest_neighbor_id(&self) -> Option<&str> {
        self.closest_neighbor
            .as_ref()
            .map(|nearest| nearest.id.as_str())
    }
}

/// Computes and caches relationships over one image's registry
#[derive(Debug)]
pub struct RelationshipCalculator<'a> {
    registry: &'a Registry,
    cache: RelationshipCache,
}

impl<'a> RelationshipCalculator<'a> {
    /// Create a calculator with an empty cache
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            cache: RelationshipCache::new(),
        }
    }

    /// Registry being measured
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Hit/miss counters of the nucleus cache
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// Relationship record for the object at a registry position
    ///
    /// Nuclei are computed once and cached. Cytoplasm and cell objects copy the
    /// record of the nucleus with the same number, or stay empty when there is
    /// none. Vessels and unnumbered cytoplasm/cell objects get only their own
    /// nearest-vessel distance.
    pub fn relationship_for(&mut self, position: usize) -> RelationshipRecord {
        let Some(object) = self.registry.get(position) else {
            return RelationshipRecord::default();
        };

        match (object.kind, object.name.number()) {
            (ObjectType::Nucleus, _) => self.nucleus_relationship(position).clone(),
            (kind, Some(number)) if kind.is_triplet_member() => self
                .registry
                .nucleus_for(number)
                .map(|nucleus| self.nucleus_relationship(nucleus).clone())
                .unwrap_or_default(),
            _ => RelationshipRecord {
                vessel: nearest_vessel(self.registry, position),
                ..RelationshipRecord::default()
            },
        }
    }

    /// Cached relationship record of a nucleus, computing it on first request
    pub fn nucleus_relationship(&mut self, nucleus: usize) -> &RelationshipRecord {
        let registry = self.registry;
        self.cache
            .get_or_compute(nucleus, || measure_nucleus(registry, nucleus))
    }
}

/// Closest vessel search candidate to the object at a registry position
///
/// Looks two grid rings around the object first and falls back to every
/// candidate when that block is empty. Candidates with the object's own
/// identifier are skipped. `None` when there are no other vessels.
pub fn nearest_vessel(registry: &Registry, position: usize) -> Option<Nearest> {
    let object = registry.get(position)?;
    let index = registry.vessel_index();
    if index.is_empty() {
        return None;
    }

    let mut candidates = index.query_nearby(object.x(), object.y(), VESSEL_SEARCH_RING);
    if candidates.is_empty() {
        debug!(
            object = object.id(),
            vessels = index.len(),
            "no vessels nearby, searching all"
        );
        candidates = index.items().iter().collect();
    }

    let origin = object.geometry.centroid;
    let mut min_distance = f64::INFINITY;
    let mut closest = None;

    for &candidate in candidates {
        let Some(vessel) = registry.get(candidate) else {
            continue;
        };
        if vessel.id() == object.id() {
            continue;
        }

        let distance = point_distance(origin, vessel.geometry.centroid);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(vessel);
        }
    }

    closest.map(|vessel| Nearest {
        id: vessel.id().to_string(),
        distance: min_distance,
    })
}

/// Full relationship record of the nucleus at a registry position
///
/// Counts every other nucleus whose center lies within the neighbour radius
/// and keeps the one with the smallest border-to-border distance. Nuclei
/// sharing this one's identifier are skipped. Ties go to the first candidate
/// in grid scan order.
pub fn measure_nucleus(registry: &Registry, nucleus: usize) -> RelationshipRecord {
    let Some(object) = registry.get(nucleus) else {
        return RelationshipRecord::default();
    };

    let config = registry.config();
    let this = object.ellipse();
    let candidates = registry
        .nucleus_index()
        .query_nearby(object.x(), object.y(), config.neighbor_ring());

    let mut neighbor_count: u32 = 0;
    let mut min_border_distance = f64::INFINITY;
    let mut closest = None;

    for &candidate in candidates {
        if candidate == nucleus {
            continue;
        }
        let Some(other) = registry.get(candidate) else {
            continue;
        };
        if other.id() == object.id() {
            continue;
        }

        let that = other.ellipse();
        if this.center_distance(&that) <= config.neighbor_radius {
            neighbor_count = neighbor_count.saturating_add(1);

            let border_distance = this.border_distance(&that);
            if border_distance < min_border_distance {
                min_border_distance = border_distance;
                closest = Some(other);
            }
        }
    }

    RelationshipRecord {
        vessel: nearest_vessel(registry, nucleus),
        neighbor_count,
        closest_neighbor: closest.map(|other| Nearest {
            id: other.id().to_string(),
            distance: min_border_distance,
        }),
    }
}

//! Deterministic output order of an image's objects
//!
//! Vessels come first by number, then legacy `Border_` vessels by number,
//! then everything else by number with Nucleus, Cytoplasm, Cell order for a
//! shared number. Identifiers without a number sort last in their bucket.
//! Remaining ties keep encounter order.

use crate::model::identifier::{NamePrefix, ObjectType};
use crate::model::object::SegmentedObject;

/// Sort key of one object; compares in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    /// 0 vessels, 1 legacy border vessels, 2 everything else
    pub bucket: u8,
    /// Identifier number, `u64::MAX` when it has none
    pub number: u64,
    /// Nucleus, Cytoplasm, Cell, then unprefixed objects
    pub type_rank: u8,
    /// Central identifiers before `_Border` ones
    pub border_rank: u8,
}

impl OrderKey {
    /// Key for an object, derived from its identifier only
    pub fn of(object: &SegmentedObject) -> Self {
        let prefix = object.name.prefix();
        let bucket = match prefix {
            Some(NamePrefix::Typed(ObjectType::Vessel)) => 0,
            Some(NamePrefix::LegacyBorder) => 1,
            _ => 2,
        };

        let Some(number) = object.name.number() else {
            return Self {
                bucket,
                number: u64::MAX,
                type_rank: 0,
                border_rank: 0,
            };
        };

        let type_rank = match prefix {
            Some(NamePrefix::Typed(ObjectType::Nucleus)) => 0,
            Some(NamePrefix::Typed(ObjectType::Cytoplasm)) => 1,
            Some(NamePrefix::Typed(ObjectType::Cell)) => 2,
            _ => 3,
        };

        Self {
            bucket,
            number: u64::from(number),
            type_rank,
            border_rank: u8::from(object.name.has_border_suffix()),
        }
    }
}

/// Positions of `objects` in output order
pub fn order_objects(objects: &[SegmentedObject]) -> Vec<usize> {
    let mut keyed: Vec<(OrderKey, usize)> = objects
        .iter()
        .enumerate()
        .map(|(position, object)| (OrderKey::of(object), position))
        .collect();

    // Position breaks remaining ties in encounter order
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, position)| position).collect()
}

//! Uniform grid bucketing 2-D points by cell for proximity queries
//!
//! Points are bucketed by `(floor(x / C), floor(y / C))`. Queries scan a
//! square block of cells around the query point's cell and return every item
//! found, without checking true distance. Callers post-filter.

use std::collections::HashMap;

use num_traits::ToPrimitive;

/// Integer cell coordinates of a grid bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Column index, `floor(x / cell_size)`
    pub x: i32,
    /// Row index, `floor(y / cell_size)`
    pub y: i32,
}

impl CellCoord {
    /// Pack both indices into one 64-bit bucket key
    pub const fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    /// Offset by whole cells, `None` when leaving the `i32` range
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Spatial hash grid over items of type `T`
///
/// Items live in one arena; buckets hold arena indices so a bucket scan
/// yields items in insertion order. Built once per image, never shrinks.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    cell_size: f64,
    items: Vec<T>,
    buckets: HashMap<u64, Bucket>,
}

#[derive(Debug, Clone)]
struct Bucket {
    cell: CellCoord,
    slots: Vec<usize>,
}

impl<T> SpatialGrid<T> {
    /// Create an empty grid with the given cell edge length
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            items: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    /// Edge length of a cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of inserted items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All inserted items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cell containing a point
    pub fn cell_of(&self, x: f64, y: f64) -> CellCoord {
        CellCoord {
            x: cell_index(x, self.cell_size),
            y: cell_index(y, self.cell_size),
        }
    }

    /// Add an item located at `(x, y)`
    pub fn insert(&mut self, x: f64, y: f64, item: T) {
        let cell = self.cell_of(x, y);
        let slot = self.items.len();
        self.items.push(item);
        self.buckets
            .entry(cell.key())
            .or_insert_with(|| Bucket {
                cell,
                slots: Vec::new(),
            })
            .slots
            .push(slot);
    }

    /// Items whose cell lies within `ring` cells (Chebyshev) of the point's cell
    ///
    /// Scans the `(2·ring + 1)²` block column by column; within a cell items
    /// come back in insertion order. A negative ring scans nothing.
    pub fn query_nearby(&self, x: f64, y: f64, ring: i32) -> Vec<&T> {
        if ring < 0 {
            return Vec::new();
        }

        let center = self.cell_of(x, y);
        let side = 2 * i64::from(ring) + 1;
        let block = side.saturating_mul(side);

        let mut cells: Vec<&Bucket> = Vec::new();
        if block > self.buckets.len() as i64 {
            // Wide rings: filter occupied buckets instead of walking empty cells
            cells.extend(
                self.buckets
                    .values()
                    .filter(|bucket| chebyshev(center, bucket.cell) <= i64::from(ring)),
            );
            cells.sort_by_key(|bucket| (bucket.cell.x, bucket.cell.y));
        } else {
            for dx in -ring..=ring {
                for dy in -ring..=ring {
                    let Some(cell) = center.offset(dx, dy) else {
                        continue;
                    };
                    if let Some(bucket) = self.buckets.get(&cell.key()) {
                        cells.push(bucket);
                    }
                }
            }
        }

        cells
            .into_iter()
            .flat_map(|bucket| bucket.slots.iter())
            .filter_map(|&slot| self.items.get(slot))
            .collect()
    }
}

fn chebyshev(a: CellCoord, b: CellCoord) -> i64 {
    let dx = (i64::from(a.x) - i64::from(b.x)).abs();
    let dy = (i64::from(a.y) - i64::from(b.y)).abs();
    dx.max(dy)
}

/// Ring radius in cells that always covers `radius` around a point
///
/// `floor(radius / cell_size) + 1`, saturating at `i32::MAX`.
pub fn ring_covering(radius: f64, cell_size: f64) -> i32 {
    (radius / cell_size)
        .floor()
        .to_i32()
        .map_or(i32::MAX, |cells| cells.saturating_add(1))
}

fn cell_index(value: f64, cell_size: f64) -> i32 {
    let cell = (value / cell_size).floor();
    cell.to_i32().unwrap_or(if cell.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}

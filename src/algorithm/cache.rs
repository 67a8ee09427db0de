use crate::algorithm::relationship::RelationshipRecord;
use std::collections::HashMap;

/// Memoization cache for per-nucleus relationship records
///
/// Keyed by the nucleus's registry position. Lives for one image pass, so a
/// nucleus is measured at most once no matter how many cytoplasm or cell rows
/// refer back to it.
#[derive(Default, Debug)]
pub struct RelationshipCache {
    records: HashMap<usize, RelationshipRecord>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl RelationshipCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cached record for a nucleus, without touching the statistics
    pub fn peek(&self, nucleus: usize) -> Option<&RelationshipRecord> {
        self.records.get(&nucleus)
    }

    /// Retrieve cached record or compute and store new one
    ///
    /// Uses the provided closure only when the nucleus has no record yet.
    pub fn get_or_compute<F>(&mut self, nucleus: usize, compute_fn: F) -> &RelationshipRecord
    where
        F: FnOnce() -> RelationshipRecord,
    {
        use std::collections::hash_map::Entry;

        match self.records.entry(nucleus) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(compute_fn())
            }
        }
    }
}

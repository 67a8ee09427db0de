/// Per-nucleus relationship memoization
pub mod cache;
/// Per-image measurement pass
pub mod executor;
/// Nearest-vessel and nearest-neighbour search
pub mod relationship;

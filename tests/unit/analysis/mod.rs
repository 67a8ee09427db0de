//! Ordering, measurement row and averaging tests

pub mod measurement;

//! Weighted Damerau-Levenshtein fuzzy search over a Latin headword corpus,
//! calibrated to QWERTY typing errors.
//!
//! The pipeline: a query is encoded into dense character ids ([`alphabet`]),
//! scored against every corpus word under a precomputed cost matrix
//! ([`cost`], [`distance`]), and the best matches are found with a
//! sharded parallel search ([`search`]). [`engine`] ties these together into
//! the public facade; [`coalesce`] adds per-session live-query coalescing on
//! top of it for interactive front ends.

pub mod alphabet;
pub mod coalesce;
pub mod config;
pub mod corpus;
pub mod cost;
pub mod distance;
pub mod engine;
pub mod error;
pub mod search;

pub use config::{EngineConfig, KeyboardLayout, ScoringConfig};
pub use engine::Engine;
pub use error::{EngineError, Result};

#[cfg(test)]
mod tests {
    include!("tests/proptest.rs");
}

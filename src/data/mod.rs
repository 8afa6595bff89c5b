//! Dataset construction and process-wide caching.
//!
//! - `roster`: the fixed per-program outcome profiles behind the synthetic data
//! - `builder`: deterministic dataset generation from a `BuildConfig`
//! - `cache`: build-once memoization shared by repeated renders

pub mod builder;
pub mod cache;
pub mod roster;

pub use builder::build_dataset;
pub use cache::DatasetCache;

//! Input/output helpers.
//!
//! - participant CSV ingest + validation (`ingest`)
//! - participant CSV / view-model JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical enums (`Program`, `EmploymentStatus`, `Location`)
//! - raw participant rows (`ParticipantInput`) and their validated form
//!   (`ParticipantRecord`, with derived income fields attached)
//! - the immutable `Dataset` plus its summary `DatasetStats`
//! - run configuration (`BuildConfig`, `AppConfig`, `DataSource`)

pub mod types;

pub use types::*;

//! Process-wide dataset memoization.
//!
//! A dashboard session may re-render many times; the dataset is built once
//! and shared read-only afterwards. `OnceCell` gives single-flight
//! initialization when the host runs renders concurrently, and the
//! aggregations downstream never mutate, so no further synchronization is
//! needed.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::domain::Dataset;
use crate::error::DataLoadError;

#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        DatasetCache {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, building it on first access.
    ///
    /// A failed build leaves the cell empty, so a later call may retry.
    pub fn get_or_build<F>(&self, build: F) -> Result<Arc<Dataset>, DataLoadError>
    where
        F: FnOnce() -> Result<Dataset, DataLoadError>,
    {
        self.cell
            .get_or_try_init(|| build().map(Arc::new))
            .map(Arc::clone)
    }

    /// The cached dataset, if one has been built already.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }
}

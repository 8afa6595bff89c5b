//! Shared dashboard workflow used by every output mode.
//!
//! Keeping this in one place avoids duplicating the core pipeline:
//! dataset build/load -> aggregation -> view-model
//!
//! The terminal front-end then focuses on presentation (printing vs exports),
//! and re-rendering reuses the cached dataset instead of rebuilding it.

use std::sync::Arc;

use crate::data::{DatasetCache, build_dataset};
use crate::domain::{AppConfig, DataSource, Dataset};
use crate::error::DataLoadError;
use crate::view::{DashboardView, build_view};

/// All computed outputs of a single dashboard pass.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Arc<Dataset>,
    pub view: DashboardView,
}

/// Execute one dashboard pass.
///
/// Dataset construction failures do not abort the run: the error is logged,
/// an empty dataset is substituted, and the view carries a warning so the
/// page still renders (with zeroed aggregates).
pub fn run_dashboard(config: &AppConfig, cache: &DatasetCache) -> RunOutput {
    let (dataset, load_warning) = match load_cached(config, cache) {
        Ok(dataset) => {
            log::info!("dataset ready: {} participants", dataset.len());
            (dataset, None)
        }
        Err(err) => {
            log::error!("dataset load failed: {err}");
            (
                Arc::new(Dataset::empty()),
                Some(format!("Data load failed: {err}")),
            )
        }
    };

    let view = build_view(&dataset, load_warning);
    RunOutput { dataset, view }
}

fn load_cached(config: &AppConfig, cache: &DatasetCache) -> Result<Arc<Dataset>, DataLoadError> {
    cache.get_or_build(|| match &config.source {
        DataSource::Synthetic(build) => build_dataset(build),
        DataSource::Csv(path) => {
            let report = crate::io::ingest::load_participants(path)?;
            for err in &report.row_errors {
                log::warn!(
                    "{}: row {} skipped: {}",
                    path.display(),
                    err.line,
                    err.message
                );
            }
            log::info!(
                "{}: {} of {} rows used",
                path.display(),
                report.rows_used,
                report.rows_read
            );
            Ok(report.dataset)
        }
    })
}

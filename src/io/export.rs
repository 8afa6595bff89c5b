//! Export participant rows to CSV and the rendered view-model to JSON.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON view is the same object any non-terminal front-end
//! would render.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Dataset;
use crate::error::AppError;
use crate::view::DashboardView;

/// Write participant rows to a CSV file.
pub fn write_participants_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "id,program,intake_date,location,income_before_ksh,income_after_12months_ksh,\
         income_increase_ksh,income_increase_pct,training_completion,business_started,\
         employment_status_before,employment_status_after,attendance_rate"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in dataset.records() {
        writeln!(
            file,
            "{},{},{},{},{:.0},{:.0},{:.0},{:.4},{},{},{},{},{:.4}",
            r.id,
            r.program.display_name(),
            r.intake_date,
            r.location.display_name(),
            r.income_before_ksh,
            r.income_after_ksh,
            r.income_increase_ksh,
            r.income_increase_pct,
            r.training_completed,
            r.business_started,
            r.status_before.display_name(),
            r.status_after.display_name(),
            r.attendance_rate,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the dashboard view-model to a JSON file.
pub fn write_view_json(path: &Path, view: &DashboardView) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create view JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, view)
        .map_err(|e| AppError::new(2, format!("Failed to write view JSON: {e}")))?;

    Ok(())
}

//! Participant CSV ingest and validation.
//!
//! This module turns a monitoring-survey export into validated
//! `ParticipantRecord`s, the same output contract as the synthetic builder:
//!
//! - **Strict schema** for required columns (clear errors)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::data::roster::cohort_intake_date;
use crate::domain::{Dataset, EmploymentStatus, Location, ParticipantInput, Program};
use crate::error::DataLoadError;

/// Columns every export must carry. `id` and `intake_date` are optional:
/// missing ids are generated from the line number, and rows without an
/// intake date default to the first intake week.
const REQUIRED_COLUMNS: [&str; 9] = [
    "program",
    "income_before_ksh",
    "income_after_12months_ksh",
    "training_completion",
    "business_started",
    "employment_status_before",
    "employment_status_after",
    "location",
    "attendance_rate",
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: the validated dataset plus row errors.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub dataset: Dataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load participant records from a CSV file.
pub fn load_participants(path: &Path) -> Result<IngestReport, DataLoadError> {
    let file = File::open(path).map_err(|e| {
        DataLoadError::new(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_participants(file)
}

/// Load participant records from any reader (file, in-memory export, ...).
pub fn read_participants<R: Read>(reader: R) -> Result<IngestReport, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataLoadError::new(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in csv_reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, line) {
            Ok(input) => {
                let id = input.id.clone();
                match input.validate() {
                    Ok(participant) => records.push(participant),
                    Err(message) => row_errors.push(RowError {
                        line,
                        id: Some(id),
                        message,
                    }),
                }
            }
            Err(message) => row_errors.push(RowError {
                line,
                id: None,
                message,
            }),
        }
    }

    let rows_used = records.len();
    if rows_used == 0 {
        return Err(DataLoadError::new(
            "No valid participant rows remain after validation.",
        ));
    }

    Ok(IngestReport {
        dataset: Dataset::from_records(records),
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), DataLoadError> {
    for column in REQUIRED_COLUMNS {
        if column == "income_after_12months_ksh" {
            // Some exports shorten the follow-up income column.
            if !header_map.contains_key(column) && !header_map.contains_key("income_after_ksh") {
                return Err(DataLoadError::new(
                    "Missing required column: `income_after_12months_ksh` (or `income_after_ksh`)",
                ));
            }
            continue;
        }
        if !header_map.contains_key(column) {
            return Err(DataLoadError::new(format!(
                "Missing required column: `{column}`"
            )));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    line: usize,
) -> Result<ParticipantInput, String> {
    let id = get_optional(record, header_map, "id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("row-{line}"));

    let program_label = get_required(record, header_map, "program")?;
    let program = Program::parse_label(program_label)
        .ok_or_else(|| format!("Unknown program '{program_label}'."))?;

    let income_before_ksh = parse_f64(get_required(record, header_map, "income_before_ksh")?)?;
    let income_after_raw = get_optional(record, header_map, "income_after_12months_ksh")
        .or_else(|| get_optional(record, header_map, "income_after_ksh"))
        .ok_or_else(|| "Missing follow-up income value.".to_string())?;
    let income_after_ksh = parse_f64(income_after_raw)?;

    let training_completed = parse_bool(get_required(record, header_map, "training_completion")?)?;
    let business_started = parse_bool(get_required(record, header_map, "business_started")?)?;

    let before_label = get_required(record, header_map, "employment_status_before")?;
    let status_before = EmploymentStatus::parse_label(before_label)
        .ok_or_else(|| format!("Unknown employment status '{before_label}'."))?;
    let after_label = get_required(record, header_map, "employment_status_after")?;
    let status_after = EmploymentStatus::parse_label(after_label)
        .ok_or_else(|| format!("Unknown employment status '{after_label}'."))?;

    let location_label = get_required(record, header_map, "location")?;
    let location = Location::parse_label(location_label)
        .ok_or_else(|| format!("Unknown location '{location_label}'."))?;

    let attendance_rate = parse_f64(get_required(record, header_map, "attendance_rate")?)?;

    let intake_date = match get_optional(record, header_map, "intake_date") {
        Some(s) => parse_date(s)?,
        None => cohort_intake_date(0),
    };

    Ok(ParticipantInput {
        id,
        program,
        intake_date,
        location,
        income_before_ksh,
        income_after_ksh,
        training_completed,
        business_started,
        status_before,
        status_after,
        attendance_rate,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("'{s}' is not a number."))?;
    if !v.is_finite() {
        return Err(format!("'{s}' is not a finite number."));
    }
    Ok(v)
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("'{other}' is not a boolean.")),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are recommended, but field exports often use day-first
    // formats. We accept a small set of common formats to reduce friction
    // while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Program,Income_Before_KSh,Income_After_12Months_KSh,Training_Completion,Business_Started,Employment_Status_Before,Employment_Status_After,Location,Attendance_Rate";

    #[test]
    fn reads_a_well_formed_export() {
        let csv = format!(
            "{HEADER}\n\
             Tailoring,3200,8200,True,True,Unemployed,Self-Employed,Langas,0.85\n\
             Soap Making,2800,6700,True,True,Unemployed,Self-Employed,Ziwa,0.92\n"
        );
        let report = read_participants(csv.as_bytes()).unwrap();
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_used, 2);
        assert!(report.row_errors.is_empty());

        let first = &report.dataset.records()[0];
        assert_eq!(first.program, Program::Tailoring);
        assert_eq!(first.id, "row-2");
        assert!((first.income_increase_pct - 156.25).abs() < 1e-9);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = format!(
            "{HEADER}\n\
             Tailoring,3200,8200,True,True,Unemployed,Self-Employed,Langas,0.85\n\
             Welding,1000,2000,True,True,Unemployed,Employed,Langas,0.80\n\
             Tailoring,0,2000,True,True,Unemployed,Employed,Langas,0.80\n"
        );
        let report = read_participants(csv.as_bytes()).unwrap();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_used, 1);
        assert_eq!(report.row_errors.len(), 2);
        assert_eq!(report.row_errors[0].line, 3);
        assert!(report.row_errors[0].message.contains("Unknown program"));
        // Zero intake income is rejected at validation, not silently kept.
        assert_eq!(report.row_errors[1].line, 4);
        assert!(report.row_errors[1].message.contains("Intake income"));
    }

    #[test]
    fn missing_required_column_fails_early() {
        let csv = "Program,Income_Before_KSh\nTailoring,3200\n";
        let err = read_participants(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing required column"));
    }

    #[test]
    fn all_rows_invalid_is_a_load_error() {
        let csv = format!(
            "{HEADER}\n\
             Welding,1000,2000,True,True,Unemployed,Employed,Langas,0.80\n"
        );
        assert!(read_participants(csv.as_bytes()).is_err());
    }

    #[test]
    fn bom_on_the_first_header_is_stripped() {
        let csv = format!("\u{feff}{HEADER}\nTailoring,3200,8200,yes,no,Unemployed,Employed,Langas,0.85\n");
        let report = read_participants(csv.as_bytes()).unwrap();
        assert_eq!(report.rows_used, 1);
        let record = &report.dataset.records()[0];
        assert!(record.training_completed);
        assert!(!record.business_started);
    }

    #[test]
    fn optional_columns_are_honoured() {
        let csv = "id,intake_date,program,income_before_ksh,income_after_ksh,training_completion,business_started,employment_status_before,employment_status_after,location,attendance_rate\n\
                   TF-09-001,2024-04-08,Hairdressing,2600,6800,1,1,unemployed,self_employed,Huruma,0.9\n";
        let report = read_participants(csv.as_bytes()).unwrap();
        let record = &report.dataset.records()[0];
        assert_eq!(record.id, "TF-09-001");
        assert_eq!(record.intake_date, NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert_eq!(record.status_after, EmploymentStatus::SelfEmployed);
    }

    #[test]
    fn date_formats_are_flexible() {
        assert_eq!(
            parse_date("2023-01-09").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()
        );
        assert_eq!(
            parse_date("09/01/2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()
        );
        assert!(parse_date("Jan 9 2023").is_err());
    }
}

//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in-memory during aggregation
//! - exported to JSON/CSV
//! - rendered by any front-end without touching the aggregation code

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Training program offered by the foundation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Program {
    Tailoring,
    Hairdressing,
    BasicComputing,
    FinancialLiteracy,
    Entrepreneurship,
    SoapMaking,
}

impl Program {
    pub const ALL: [Program; 6] = [
        Program::Tailoring,
        Program::Hairdressing,
        Program::BasicComputing,
        Program::FinancialLiteracy,
        Program::Entrepreneurship,
        Program::SoapMaking,
    ];

    /// Human-readable label for terminal output and CSV round-trips.
    pub fn display_name(self) -> &'static str {
        match self {
            Program::Tailoring => "Tailoring",
            Program::Hairdressing => "Hairdressing",
            Program::BasicComputing => "Basic Computing",
            Program::FinancialLiteracy => "Financial Literacy",
            Program::Entrepreneurship => "Entrepreneurship",
            Program::SoapMaking => "Soap Making",
        }
    }

    /// Parse a survey-export label (case-insensitive, spaces or dashes).
    pub fn parse_label(s: &str) -> Option<Program> {
        Program::ALL
            .into_iter()
            .find(|p| label_matches(p.display_name(), s))
    }
}

/// Employment status of a participant at a survey point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Unemployed,
    CasualLabor,
    SmallBusiness,
    SelfEmployed,
    Employed,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 5] = [
        EmploymentStatus::Unemployed,
        EmploymentStatus::CasualLabor,
        EmploymentStatus::SmallBusiness,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Employed,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::CasualLabor => "Casual Labor",
            EmploymentStatus::SmallBusiness => "Small Business",
            EmploymentStatus::SelfEmployed => "Self-Employed",
            EmploymentStatus::Employed => "Employed",
        }
    }

    pub fn parse_label(s: &str) -> Option<EmploymentStatus> {
        EmploymentStatus::ALL
            .into_iter()
            .find(|e| label_matches(e.display_name(), s))
    }

    /// Any status other than `Unemployed` counts as earning activity.
    pub fn is_earning(self) -> bool {
        !matches!(self, EmploymentStatus::Unemployed)
    }
}

/// Catchment area the participant was recruited from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    Langas,
    Huruma,
    EldoretCentral,
    Kipkaren,
    Kimumu,
    Ziwa,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Langas,
        Location::Huruma,
        Location::EldoretCentral,
        Location::Kipkaren,
        Location::Kimumu,
        Location::Ziwa,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Location::Langas => "Langas",
            Location::Huruma => "Huruma",
            Location::EldoretCentral => "Eldoret Central",
            Location::Kipkaren => "Kipkaren",
            Location::Kimumu => "Kimumu",
            Location::Ziwa => "Ziwa",
        }
    }

    pub fn parse_label(s: &str) -> Option<Location> {
        Location::ALL
            .into_iter()
            .find(|l| label_matches(l.display_name(), s))
    }
}

/// Case-insensitive label comparison that treats spaces, dashes and
/// underscores as interchangeable ("Self-Employed" == "self employed").
fn label_matches(canonical: &str, candidate: &str) -> bool {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
    };
    norm(canonical) == norm(candidate.trim())
}

/// A raw participant row before validation (one line of a survey export, or
/// one generated roster entry).
///
/// Keeping the raw form separate lets us do row-level validation with good
/// error messages and compute the derived income fields in exactly one place.
#[derive(Debug, Clone)]
pub struct ParticipantInput {
    pub id: String,
    pub program: Program,
    pub intake_date: NaiveDate,
    pub location: Location,
    pub income_before_ksh: f64,
    pub income_after_ksh: f64,
    pub training_completed: bool,
    pub business_started: bool,
    pub status_before: EmploymentStatus,
    pub status_after: EmploymentStatus,
    pub attendance_rate: f64,
}

impl ParticipantInput {
    /// Validate the row and attach the derived income fields.
    ///
    /// A row with a non-positive intake income cannot support the relative
    /// growth computation and is rejected here, so percentage fields are
    /// total over every record that enters a dataset.
    pub fn validate(self) -> Result<ParticipantRecord, String> {
        if self.id.trim().is_empty() {
            return Err("Missing participant id.".to_string());
        }
        if !self.income_before_ksh.is_finite() || self.income_before_ksh <= 0.0 {
            return Err("Intake income must be finite and > 0 KSh.".to_string());
        }
        if !self.income_after_ksh.is_finite() || self.income_after_ksh < 0.0 {
            return Err("Follow-up income must be finite and >= 0 KSh.".to_string());
        }
        if !self.attendance_rate.is_finite()
            || self.attendance_rate < 0.0
            || self.attendance_rate > 1.0
        {
            return Err("Attendance rate must be within [0, 1].".to_string());
        }

        let income_increase_ksh = self.income_after_ksh - self.income_before_ksh;
        let income_increase_pct = income_increase_ksh / self.income_before_ksh * 100.0;

        Ok(ParticipantRecord {
            id: self.id,
            program: self.program,
            intake_date: self.intake_date,
            location: self.location,
            income_before_ksh: self.income_before_ksh,
            income_after_ksh: self.income_after_ksh,
            training_completed: self.training_completed,
            business_started: self.business_started,
            status_before: self.status_before,
            status_after: self.status_after,
            attendance_rate: self.attendance_rate,
            income_increase_ksh,
            income_increase_pct,
        })
    }
}

/// One participant's training outcome row.
///
/// Only produced by [`ParticipantInput::validate`], so the invariants hold
/// for every record in circulation: positive intake income, finite incomes,
/// attendance within [0, 1], derived fields consistent with the incomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: String,
    pub program: Program,
    pub intake_date: NaiveDate,
    pub location: Location,
    /// Monthly income (KSh) at intake.
    pub income_before_ksh: f64,
    /// Monthly income (KSh) at the 12-month follow-up survey.
    pub income_after_ksh: f64,
    pub training_completed: bool,
    pub business_started: bool,
    pub status_before: EmploymentStatus,
    pub status_after: EmploymentStatus,
    /// Fraction of sessions attended.
    pub attendance_rate: f64,
    /// Absolute income change over 12 months (after minus before).
    pub income_increase_ksh: f64,
    /// Relative income growth in percent of the intake income.
    pub income_increase_pct: f64,
}

/// Summary stats about the records in a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_records: usize,
    pub n_programs: usize,
    pub income_before_min: f64,
    pub income_before_max: f64,
    pub intake_first: Option<NaiveDate>,
    pub intake_last: Option<NaiveDate>,
}

/// An ordered collection of participant records, immutable after construction.
///
/// Built once per process (see `data::DatasetCache`) and shared read-only;
/// aggregate views are recomputed from it on each render pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<ParticipantRecord>,
    stats: DatasetStats,
}

impl Dataset {
    pub fn from_records(records: Vec<ParticipantRecord>) -> Dataset {
        let stats = compute_stats(&records);
        Dataset { records, stats }
    }

    pub fn empty() -> Dataset {
        Dataset::default()
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn compute_stats(records: &[ParticipantRecord]) -> DatasetStats {
    let mut stats = DatasetStats::default();
    if records.is_empty() {
        return stats;
    }

    let mut income_min = f64::INFINITY;
    let mut income_max = f64::NEG_INFINITY;
    let mut programs: Vec<Program> = Vec::new();

    for r in records {
        income_min = income_min.min(r.income_before_ksh);
        income_max = income_max.max(r.income_before_ksh);
        if !programs.contains(&r.program) {
            programs.push(r.program);
        }
        stats.intake_first = Some(match stats.intake_first {
            Some(d) => d.min(r.intake_date),
            None => r.intake_date,
        });
        stats.intake_last = Some(match stats.intake_last {
            Some(d) => d.max(r.intake_date),
            None => r.intake_date,
        });
    }

    stats.n_records = records.len();
    stats.n_programs = programs.len();
    stats.income_before_min = income_min;
    stats.income_before_max = income_max;
    stats
}

/// Synthetic dataset generation settings (derived from CLI flags plus defaults).
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Number of intake cohorts the base roster is replicated across.
    pub cohorts: usize,
    /// Seed for the income/attendance noise stream.
    pub seed: u64,
    /// Relative std-dev of the income noise; 0 reproduces the roster exactly.
    pub income_jitter: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            cohorts: 8,
            seed: 42,
            income_jitter: 0.0,
        }
    }
}

/// Where participant records come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Built-in survey roster replicated across cohorts.
    Synthetic(BuildConfig),
    /// A monitoring-survey CSV export.
    Csv(PathBuf),
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: DataSource,
    /// Append the raw participant table to the dashboard output.
    pub show_raw: bool,
    pub export_csv: Option<PathBuf>,
    pub export_view: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> ParticipantInput {
        ParticipantInput {
            id: "TF-01-001".to_string(),
            program: Program::Tailoring,
            intake_date: NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            location: Location::Langas,
            income_before_ksh: 3200.0,
            income_after_ksh: 8200.0,
            training_completed: true,
            business_started: true,
            status_before: EmploymentStatus::Unemployed,
            status_after: EmploymentStatus::SelfEmployed,
            attendance_rate: 0.85,
        }
    }

    #[test]
    fn validate_attaches_derived_fields() {
        let record = base_input().validate().unwrap();
        assert!((record.income_increase_ksh - 5000.0).abs() < 1e-9);
        assert!((record.income_increase_pct - 156.25).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_zero_intake_income() {
        let mut input = base_input();
        input.income_before_ksh = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn validate_rejects_attendance_out_of_range() {
        let mut input = base_input();
        input.attendance_rate = 1.2;
        assert!(input.validate().is_err());
    }

    #[test]
    fn labels_round_trip() {
        for p in Program::ALL {
            assert_eq!(Program::parse_label(p.display_name()), Some(p));
        }
        for e in EmploymentStatus::ALL {
            assert_eq!(EmploymentStatus::parse_label(e.display_name()), Some(e));
        }
        assert_eq!(
            EmploymentStatus::parse_label("self employed"),
            Some(EmploymentStatus::SelfEmployed)
        );
        assert_eq!(Program::parse_label("basic_computing"), Some(Program::BasicComputing));
        assert_eq!(Program::parse_label("welding"), None);
    }

    #[test]
    fn dataset_stats_cover_income_and_dates() {
        let mut a = base_input();
        a.id = "A".to_string();
        let mut b = base_input();
        b.id = "B".to_string();
        b.program = Program::SoapMaking;
        b.income_before_ksh = 2800.0;
        b.intake_date = NaiveDate::from_ymd_opt(2023, 4, 10).unwrap();

        let ds = Dataset::from_records(vec![a.validate().unwrap(), b.validate().unwrap()]);
        let stats = ds.stats();
        assert_eq!(stats.n_records, 2);
        assert_eq!(stats.n_programs, 2);
        assert!((stats.income_before_min - 2800.0).abs() < 1e-9);
        assert!((stats.income_before_max - 3200.0).abs() < 1e-9);
        assert_eq!(stats.intake_first, NaiveDate::from_ymd_opt(2023, 1, 9));
        assert_eq!(stats.intake_last, NaiveDate::from_ymd_opt(2023, 4, 10));
    }

    #[test]
    fn empty_dataset_has_default_stats() {
        let ds = Dataset::empty();
        assert!(ds.is_empty());
        assert_eq!(ds.stats().n_records, 0);
        assert_eq!(ds.stats().intake_first, None);
    }
}

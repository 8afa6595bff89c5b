//! Base outcome roster used by the synthetic dataset builder.
//!
//! The numbers mirror the foundation's monitoring survey: one profile per
//! program, replicated across intake cohorts by the builder. A production
//! deployment swaps this for a CSV export (see `io::ingest`), which feeds the
//! same validation path and dataset type.

use chrono::{Duration, NaiveDate};

use crate::domain::{EmploymentStatus, Location, Program};

/// One program's baseline outcome profile.
#[derive(Debug, Clone, Copy)]
pub struct ProgramProfile {
    pub program: Program,
    pub income_before_ksh: f64,
    pub income_after_ksh: f64,
    pub training_completed: bool,
    pub business_started: bool,
    pub status_before: EmploymentStatus,
    pub status_after: EmploymentStatus,
    pub location: Location,
    pub attendance_rate: f64,
}

/// Survey profiles, one per program.
pub const ROSTER: [ProgramProfile; 6] = [
    ProgramProfile {
        program: Program::Tailoring,
        income_before_ksh: 3200.0,
        income_after_ksh: 8200.0,
        training_completed: true,
        business_started: true,
        status_before: EmploymentStatus::Unemployed,
        status_after: EmploymentStatus::SelfEmployed,
        location: Location::Langas,
        attendance_rate: 0.85,
    },
    ProgramProfile {
        program: Program::Hairdressing,
        income_before_ksh: 2600.0,
        income_after_ksh: 6800.0,
        training_completed: true,
        business_started: true,
        status_before: EmploymentStatus::Unemployed,
        status_after: EmploymentStatus::SelfEmployed,
        location: Location::Huruma,
        attendance_rate: 0.90,
    },
    ProgramProfile {
        program: Program::BasicComputing,
        income_before_ksh: 3900.0,
        income_after_ksh: 9700.0,
        training_completed: false,
        business_started: false,
        status_before: EmploymentStatus::CasualLabor,
        status_after: EmploymentStatus::Employed,
        location: Location::EldoretCentral,
        attendance_rate: 0.80,
    },
    ProgramProfile {
        program: Program::FinancialLiteracy,
        income_before_ksh: 3300.0,
        income_after_ksh: 6800.0,
        training_completed: true,
        business_started: true,
        status_before: EmploymentStatus::Unemployed,
        status_after: EmploymentStatus::SelfEmployed,
        location: Location::Kipkaren,
        attendance_rate: 0.95,
    },
    ProgramProfile {
        program: Program::Entrepreneurship,
        income_before_ksh: 2800.0,
        income_after_ksh: 8100.0,
        training_completed: true,
        business_started: true,
        status_before: EmploymentStatus::SmallBusiness,
        status_after: EmploymentStatus::SelfEmployed,
        location: Location::Kimumu,
        attendance_rate: 0.88,
    },
    ProgramProfile {
        program: Program::SoapMaking,
        income_before_ksh: 2800.0,
        income_after_ksh: 6700.0,
        training_completed: true,
        business_started: true,
        status_before: EmploymentStatus::Unemployed,
        status_after: EmploymentStatus::SelfEmployed,
        location: Location::Ziwa,
        attendance_rate: 0.92,
    },
];

/// Intake date for a cohort: the first 2023 intake Monday, then 13-week
/// (one quarter) intervals.
pub fn cohort_intake_date(cohort: usize) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap_or_default();
    first
        .checked_add_signed(Duration::weeks(13 * cohort as i64))
        .unwrap_or(first)
}

//! Command-line parsing for the dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tumaini",
    version,
    about = "Tumaini Foundation training-outcomes dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the full dashboard (the default when no subcommand is given).
    Render(RenderArgs),
    /// Print the headline KPIs only (useful for scripting).
    Kpis(RenderArgs),
    /// Print the raw participant table.
    Data(RenderArgs),
}

/// Common options for all output modes.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Load participant records from a survey CSV export instead of the
    /// built-in roster.
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Number of intake cohorts to generate (synthetic data only).
    #[arg(long, default_value_t = 8)]
    pub cohorts: usize,

    /// Seed for the income noise stream (synthetic data only).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Relative std-dev of income noise; 0 reproduces the survey roster
    /// exactly (synthetic data only).
    #[arg(long, default_value_t = 0.0)]
    pub income_jitter: f64,

    /// Append the raw participant table to the dashboard output.
    #[arg(long)]
    pub raw: bool,

    /// Export participant rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the rendered view-model to JSON.
    #[arg(long = "export-view", value_name = "JSON")]
    pub export_view: Option<PathBuf>,
}

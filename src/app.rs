//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds (or loads) the participant dataset once
//! - computes the dashboard view-model
//! - prints the report and writes optional exports

use clap::Parser;

use crate::cli::{Command, RenderArgs};
use crate::data::DatasetCache;
use crate::domain::{AppConfig, BuildConfig, DataSource};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tumaini` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::init();

    // We want `tumaini` and `tumaini --raw` to behave like `tumaini render ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the zero-argument UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => handle_render(args, OutputMode::Full),
        Command::Kpis(args) => handle_render(args, OutputMode::KpisOnly),
        Command::Data(args) => handle_render(args, OutputMode::RawOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    KpisOnly,
    RawOnly,
}

fn handle_render(args: RenderArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = app_config_from_args(&args);
    let cache = DatasetCache::new();
    let run = pipeline::run_dashboard(&config, &cache);

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::render_dashboard(&run.view));
            if config.show_raw {
                println!("{}", crate::report::render_raw_table(&run.dataset));
            }
        }
        OutputMode::KpisOnly => {
            println!("{}", crate::report::render_kpis(&run.view));
        }
        OutputMode::RawOnly => {
            println!("{}", crate::report::render_raw_table(&run.dataset));
        }
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_participants_csv(path, &run.dataset)?;
    }
    if let Some(path) = &config.export_view {
        crate::io::export::write_view_json(path, &run.view)?;
    }

    Ok(())
}

pub fn app_config_from_args(args: &RenderArgs) -> AppConfig {
    let source = match &args.input {
        Some(path) => DataSource::Csv(path.clone()),
        None => DataSource::Synthetic(BuildConfig {
            cohorts: args.cohorts,
            seed: args.seed,
            income_jitter: args.income_jitter,
        }),
    };

    AppConfig {
        source,
        show_raw: args.raw,
        export_csv: args.export.clone(),
        export_view: args.export_view.clone(),
    }
}

fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    const COMMANDS: [&str; 3] = ["render", "kpis", "data"];
    const PASSTHROUGH: [&str; 4] = ["--help", "-h", "--version", "-V"];

    let needs_default = match argv.get(1) {
        None => true,
        Some(first) => {
            !COMMANDS.contains(&first.as_str()) && !PASSTHROUGH.contains(&first.as_str())
        }
    };
    if needs_default {
        argv.insert(1, "render".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_render() {
        assert_eq!(
            rewrite_args(to_argv(&["tumaini"])),
            to_argv(&["tumaini", "render"])
        );
        assert_eq!(
            rewrite_args(to_argv(&["tumaini", "--raw"])),
            to_argv(&["tumaini", "render", "--raw"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(to_argv(&["tumaini", "kpis"])),
            to_argv(&["tumaini", "kpis"])
        );
        assert_eq!(
            rewrite_args(to_argv(&["tumaini", "--help"])),
            to_argv(&["tumaini", "--help"])
        );
    }

    #[test]
    fn input_flag_switches_the_data_source() {
        let args = RenderArgs {
            input: Some("survey.csv".into()),
            cohorts: 8,
            seed: 42,
            income_jitter: 0.0,
            raw: false,
            export: None,
            export_view: None,
        };
        let config = app_config_from_args(&args);
        assert!(matches!(config.source, DataSource::Csv(_)));

        let args = RenderArgs { input: None, ..args };
        let config = app_config_from_args(&args);
        match config.source {
            DataSource::Synthetic(build) => {
                assert_eq!(build.cohorts, 8);
                assert_eq!(build.seed, 42);
            }
            DataSource::Csv(_) => panic!("expected the synthetic source"),
        }
    }
}

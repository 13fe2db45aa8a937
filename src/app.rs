//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the parsed model output
//! - runs the tuning-table builder
//! - prints the summary/table/warnings
//! - reports the optional file write

use clap::Parser;

use crate::cli::{Command, InspectArgs, TuneArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `comptune` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    // We want `comptune report.json` to behave like `comptune tune report.json`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tune(args) => handle_tune(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

fn handle_tune(args: TuneArgs) -> Result<(), AppError> {
    let config = pipeline::tune_config_from_args(&args);
    let run = pipeline::run_tune(&config)?;

    print!(
        "{}",
        crate::report::format_run_summary(&run.output, &run.options, &run.result)
    );
    print!("{}", crate::report::format_tuning_table(&run.result.table));
    print!("{}", crate::report::format_warnings(&run.result.diagnostics));

    if let Some(path) = &run.result.written_to {
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let output = crate::io::model::load_model_output(&args.report)?;
    let inspection = crate::report::inspect_output(&output)?;
    print!("{}", crate::report::format_inspection(&output, &inspection));
    Ok(())
}

/// Rewrite argv so `comptune <report>` defaults to `comptune tune <report>`.
///
/// Rules:
/// - `comptune`                     -> unchanged (clap prints the help)
/// - `comptune report.json ...`     -> `comptune tune report.json ...`
/// - `comptune --help/--version/-h` -> unchanged
/// - explicit subcommands           -> unchanged
fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tune" | "inspect");
    if is_subcommand {
        return argv;
    }

    // Anything else is treated as `tune` arguments.
    let mut argv = argv;
    argv.insert(1, "tune".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_report_path_defaults_to_tune() {
        assert_eq!(
            rewrite_args(args(&["comptune", "report.json", "-m", "var-ratio"])),
            args(&["comptune", "tune", "report.json", "-m", "var-ratio"])
        );
    }

    #[test]
    fn explicit_subcommands_are_untouched() {
        assert_eq!(
            rewrite_args(args(&["comptune", "inspect", "report.json"])),
            args(&["comptune", "inspect", "report.json"])
        );
    }

    #[test]
    fn help_and_version_are_untouched() {
        assert_eq!(
            rewrite_args(args(&["comptune", "--help"])),
            args(&["comptune", "--help"])
        );
        assert_eq!(rewrite_args(args(&["comptune"])), args(&["comptune"]));
    }
}

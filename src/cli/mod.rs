//! Command-line parsing for the composition-weighting tuner.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the reconciliation code. Method and fleet
//! selectors stay raw strings here; the library validates them so the same
//! closed-set checks apply to programmatic callers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "comptune",
    version,
    about = "Suggest composition-data weighting factors from stock-assessment model output"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the tuning table, print it, and optionally write
    /// suggested_tuning.ss into the model directory.
    Tune(TuneArgs),
    /// Summarize a model output: fleets, data availability, and which
    /// report-schema convention its tables use.
    Inspect(InspectArgs),
}

/// Options for building the tuning table.
#[derive(Debug, Parser, Clone)]
pub struct TuneArgs {
    /// Parsed model-output JSON file.
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,

    /// Fleets to tune: "all" or a comma-separated list (e.g. "1,3").
    #[arg(short = 'f', long, default_value = "all")]
    pub fleets: String,

    /// Method for the recommended column: none, dispersion, var-ratio.
    #[arg(short = 'm', long, default_value = "none")]
    pub method: String,

    /// Decimal digits for rounded output values.
    #[arg(short = 'd', long, default_value_t = 3)]
    pub digits: u32,

    /// Write <model_dir>/suggested_tuning.ss alongside the printed table.
    #[arg(short = 'w', long)]
    pub write: bool,
}

/// Options for inspecting a model output.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Parsed model-output JSON file.
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,
}

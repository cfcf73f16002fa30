//! Command-line parsing for the constant sweep.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! sweep itself. Everything here is turned into a `SweepConfig` by `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_EXPERIMENTAL_FILE, DEFAULT_SIMULATION_FILE};
use crate::grid::Axis;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "cfsweep",
    version,
    about = "Grid search for skin-friction model constants against experimental data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate every combination of the four grids and report the best one.
    Sweep(SweepArgs),
    /// Evaluate a single combination and print the aligned curves.
    Eval(EvalArgs),
}

/// Inputs shared by `sweep` and `eval`.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Experimental reference file (comma separated, 1 header line).
    ///
    /// Relative paths are resolved against the root directory.
    #[arg(short = 'e', long, default_value = DEFAULT_EXPERIMENTAL_FILE)]
    pub experimental: PathBuf,

    /// Simulation output filename inside each combination directory.
    #[arg(long, default_value = DEFAULT_SIMULATION_FILE)]
    pub sim_file: String,

    /// Root of the `Ct_=_*/At_=_*/Css_=_*/a2_=_*` tree.
    ///
    /// Defaults to `CFSWEEP_ROOT` (environment or `.env`), then the current directory.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Options for the full sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Ct values: list (`3,4,5`) or inclusive range (`start:stop:step`).
    #[arg(long, default_value = "3:15:1")]
    pub ct: Axis,

    /// At values: list or inclusive range.
    #[arg(long, default_value = "1:11:1")]
    pub at: Axis,

    /// Css values: list or inclusive range.
    #[arg(long, default_value = "0.5:3:0.5")]
    pub css: Axis,

    /// a2 values: list or inclusive range.
    #[arg(long, default_value = "0.4:0.7:0.1")]
    pub a2: Axis,

    /// Worker threads for evaluating combinations (1 = sequential).
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,

    /// Stop at the first combination that cannot be evaluated.
    #[arg(long)]
    pub strict: bool,

    /// Directory for the timestamped run log.
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,

    /// Do not write a run log file.
    #[arg(long)]
    pub no_log: bool,

    /// Show the N best combinations.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export per-combination errors to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the best result and run summary to JSON.
    #[arg(long = "export-best")]
    pub export_best: Option<PathBuf>,
}

/// Options for evaluating one combination.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long)]
    pub ct: f64,

    #[arg(long)]
    pub at: f64,

    #[arg(long)]
    pub css: f64,

    #[arg(long)]
    pub a2: f64,
}

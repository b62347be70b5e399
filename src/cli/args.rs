//! CLI argument definitions.

use crate::cli::validators::{parse_density, parse_rate};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kiwi call burst detection from per-segment features.
#[derive(Debug, Parser)]
#[command(name = "kiwi-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Feature CSV files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Directory containing model.onnx and scaler.onnx (overrides config).
    #[arg(short, long, env = "KIWI_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Segment mapping CSV (only with a single input file).
    #[arg(short, long)]
    pub segments: Option<PathBuf>,

    /// Calls-per-time normalizing rate used for densities.
    #[arg(short, long, value_parser = parse_rate, env = "KIWI_RATE")]
    pub rate: Option<f64>,

    /// Output formats (comma-separated: csv,json).
    #[arg(short, long, value_delimiter = ',', env = "KIWI_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "KIWI_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Minimum call density for candidates (overrides config).
    #[arg(long, value_parser = parse_density)]
    pub min_density: Option<f64>,

    /// Merge overlapping candidates of the same sex.
    #[arg(long)]
    pub merge: bool,

    /// Stop on first error instead of continuing.
    #[arg(long)]
    pub fail_fast: bool,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,
}

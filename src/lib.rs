//! Kiwi-finder - kiwi call burst detection.
//!
//! This crate labels audio segments with a pre-trained classifier and turns
//! the label sequence into a whole-recording verdict and density-scored call
//! bursts for female and male kiwi.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod pipeline;

use clap::{CommandFactory, Parser};
use cli::{AnalyzeArgs, Cli, Command};
use config::{Config, config_file_path, validate_config};
use detection::KiwiFinder;
use model::CallClassifier;
use pipeline::{collect_input_files, output_dir_for, process_recording};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for kiwi-finder CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = Config::load()?;
    analyze_files(&cli.inputs, &cli.analyze, config)
}

/// Analyze feature files with the given options.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, mut config: Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    if let Some(density) = args.min_density {
        config.detection.min_calls_density = density;
    }
    if args.merge {
        config.detection.merge_overlapping = true;
    }
    if let Some(ref formats) = args.format {
        config.output.formats.clone_from(formats);
    }
    validate_config(&config)?;

    let rate = args.rate.ok_or_else(|| Error::ConfigValidation {
        message: "no rate specified (use --rate or KIWI_RATE)".to_string(),
    })?;

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }
    if args.segments.is_some() && files.len() > 1 {
        return Err(Error::ConfigValidation {
            message: "--segments requires exactly one input file".to_string(),
        });
    }

    info!("Found {} feature file(s) to process", files.len());

    let model_dir = args
        .model_dir
        .clone()
        .or_else(|| config.model.directory.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no model directory specified (use --model-dir or set model.directory in config)"
                .to_string(),
        })?;

    let classifier = CallClassifier::from_directory(&model_dir)?;
    let mut finder = KiwiFinder::new(classifier, config.detection);

    let mut processed = 0;
    let mut errors = 0;
    let mut total_candidates = 0;

    for file in &files {
        let segments_path = args
            .segments
            .clone()
            .unwrap_or_else(|| input::segments_path_for(file));
        let file_output_dir = output_dir_for(file, args.output_dir.as_deref());

        match process_recording(
            file,
            &segments_path,
            &file_output_dir,
            &mut finder,
            rate,
            &config.output.formats,
        ) {
            Ok(result) => {
                processed += 1;
                total_candidates += result.candidates;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} errors, {} total candidates in {:.2}s",
        processed, errors, total_candidates, total_duration
    );

    let tally = finder.tally();
    info!(
        "Verdict tally: {}",
        tally
            .iter()
            .map(|(verdict, count)| format!("{verdict}={count}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ONNX Runtime is chatty below warn; -vv lets its info through
    let filter_str = if quiet {
        "warn,ort=off"
    } else {
        match verbose {
            0 => "info,ort=off",
            1 => "debug,ort=warn",
            _ => "trace,ort=info",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                Config::default().write_to(&path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  set [model] directory to the folder holding model.onnx and scaler.onnx");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

//! Pipeline coordination for file processing.

use crate::config::OutputFormat;
use crate::constants::{input::FEATURES_SUFFIX, output_extensions};
use crate::error::Result;
use crate::input::recording_stem;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Get output file path for a given format.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = recording_stem(input);

    let extension = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
    };

    output_dir.join(format!("{stem}{extension}"))
}

/// Collect feature files from paths (files and directories).
///
/// Explicit files are always taken; directories are searched recursively for
/// `*.features.csv`.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_feature_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

fn collect_feature_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_feature_files_recursive(&path, files)?;
        } else if is_feature_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_feature_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(FEATURES_SUFFIX))
}

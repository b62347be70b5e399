//! Input file readers for feature matrices and segment mappings.

mod features;
mod segments;

pub use features::read_features;
pub use segments::read_segments;

use crate::constants::input::{FEATURES_SUFFIX, SEGMENTS_SUFFIX};
use std::path::{Path, PathBuf};

/// Segment mapping file expected next to a features file.
///
/// `rec.features.csv` pairs with `rec.segments.csv`; any other name pairs
/// with `<stem>.segments.csv`.
pub fn segments_path_for(features: &Path) -> PathBuf {
    features.with_file_name(format!("{}{SEGMENTS_SUFFIX}", recording_stem(features)))
}

/// Recording name used for output files.
pub fn recording_stem(features: &Path) -> String {
    let name = features
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    name.strip_suffix(FEATURES_SUFFIX).map_or_else(
        || {
            features
                .file_stem()
                .map_or_else(|| "unknown".to_string(), |s| s.to_string_lossy().into_owned())
        },
        str::to_string,
    )
}

//! Configuration type definitions.

use crate::constants::detection::{
    BORDER_RUN_LENGTH, MIN_CALLS_DENSITY, MIN_RUN_LENGTH, RELAXED_RUN_LENGTH,
};
use crate::detection::{BoundaryCheck, SubWindowIndexing};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model location.
    #[serde(default)]
    pub model: ModelConfig,

    /// Detection thresholds.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the trained model lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing `model.onnx` and `scaler.onnx`.
    pub directory: Option<PathBuf>,
}

/// Call detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Consecutive identical labels required for a burst.
    pub min_run_length: usize,

    /// Run length for the retry when nothing is found.
    pub relaxed_run_length: usize,

    /// Run length for candidates in the edge slices.
    pub border_run_length: usize,

    /// Candidates need a density strictly above this.
    pub min_calls_density: f64,

    /// Edge counting mode for the run detector.
    pub boundary_check: BoundaryCheck,

    /// Sub-window placement for sparse regions.
    pub subwindow_indexing: SubWindowIndexing,

    /// Merge overlapping candidates of the same sex.
    pub merge_overlapping: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_run_length: MIN_RUN_LENGTH,
            relaxed_run_length: RELAXED_RUN_LENGTH,
            border_run_length: BORDER_RUN_LENGTH,
            min_calls_density: MIN_CALLS_DENSITY,
            boundary_check: BoundaryCheck::default(),
            subwindow_indexing: SubWindowIndexing::default(),
            merge_overlapping: false,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report formats to write.
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Csv],
        }
    }
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Candidate table.
    Csv,
    /// Full JSON report.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("JSON".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert!("raven".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_detection_config_default_values() {
        let detection = DetectionConfig::default();
        assert_eq!(detection.min_run_length, 4);
        assert_eq!(detection.relaxed_run_length, 3);
        assert_eq!(detection.border_run_length, 3);
        assert_eq!(detection.min_calls_density, 0.5);
        assert_eq!(detection.boundary_check, BoundaryCheck::Reference);
        assert_eq!(detection.subwindow_indexing, SubWindowIndexing::Raw);
        assert!(!detection.merge_overlapping);
    }
}

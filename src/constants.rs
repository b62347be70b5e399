//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "kiwi-finder";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Scaler file name inside the model directory.
pub const SCALER_FILE_NAME: &str = "scaler.onnx";

/// Classifier file name inside the model directory.
pub const MODEL_FILE_NAME: &str = "model.onnx";

/// Detection thresholds.
pub mod detection {
    /// Number of identical consecutive labels that make up a call burst.
    pub const MIN_RUN_LENGTH: usize = 4;

    /// Run length used when the first detection attempt finds nothing.
    pub const RELAXED_RUN_LENGTH: usize = 3;

    /// Number of segments inspected at each edge of the recording.
    ///
    /// Also the minimum run length for candidates found in the edge slices.
    pub const BORDER_RUN_LENGTH: usize = 3;

    /// Candidates must have a call density strictly above this value.
    pub const MIN_CALLS_DENSITY: f64 = 0.5;
}

/// Input file naming.
pub mod input {
    /// Suffix of feature matrix files.
    pub const FEATURES_SUFFIX: &str = ".features.csv";

    /// Suffix of segment mapping files.
    pub const SEGMENTS_SUFFIX: &str = ".segments.csv";
}

/// Output file extensions by format.
pub mod output_extensions {
    /// Candidate CSV extension.
    pub const CSV: &str = ".kiwi.candidates.csv";
    /// JSON report extension.
    pub const JSON: &str = ".kiwi.json";
}

/// Decimal places used when writing densities.
pub const DENSITY_DECIMAL_PLACES: usize = 3;


//! Error types for kiwi-finder.

/// Result type alias for kiwi-finder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for kiwi-finder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Scaler or classifier could not be loaded.
    #[error("failed to load model file '{path}'")]
    ModelLoad {
        /// Path to the model or scaler file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Running a loaded scaler or classifier failed.
    #[error("inference failed for '{path}': {reason}")]
    Inference {
        /// Path to the model or scaler file.
        path: std::path::PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Feature matrix width does not match the fitted scaler/model.
    #[error("invalid feature shape: expected {expected} columns, got {actual}")]
    InvalidFeatureShape {
        /// Column count the scaler/model were fitted on.
        expected: usize,
        /// Column count of the supplied matrix.
        actual: usize,
    },

    /// Label sequence and segment mapping are not index-aligned.
    #[error("segment count mismatch: {labels} labels but {segments} segments")]
    SegmentCountMismatch {
        /// Number of labels (or condition entries).
        labels: usize,
        /// Number of segment time ranges.
        segments: usize,
    },

    /// No input files were given.
    #[error("no input feature files provided")]
    NoInputFiles,

    /// Failed to read an input CSV file.
    #[error("failed to read input file '{path}'")]
    InputRead {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input file content is malformed.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// Failed to create an output file or directory.
    #[error("failed to write output '{path}'")]
    OutputWrite {
        /// Path to the output file or directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

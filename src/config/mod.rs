//! Configuration loading and management.

mod file;
mod types;
mod validate;

pub use file::config_file_path;
pub use types::{Config, DetectionConfig, ModelConfig, OutputConfig, OutputFormat};
pub use validate::{validate_config, validate_detection};

//! Configuration validation.

use crate::config::{Config, DetectionConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_detection(&config.detection)?;

    if config.output.formats.is_empty() {
        return Err(Error::ConfigValidation {
            message: "at least one output format is required".to_string(),
        });
    }

    Ok(())
}

/// Validate detection thresholds.
pub fn validate_detection(detection: &DetectionConfig) -> Result<()> {
    for (name, value) in [
        ("min_run_length", detection.min_run_length),
        ("relaxed_run_length", detection.relaxed_run_length),
        ("border_run_length", detection.border_run_length),
    ] {
        if value == 0 {
            return Err(Error::ConfigValidation {
                message: format!("{name} must be at least 1"),
            });
        }
    }

    if !detection.min_calls_density.is_finite() || detection.min_calls_density < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_calls_density must be a non-negative number, got {}",
                detection.min_calls_density
            ),
        });
    }

    Ok(())
}

//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse and validate a positive, finite rate.
pub fn parse_rate(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;

    if !(value.is_finite() && value > 0.0) {
        return Err(format!("rate must be a positive number, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a non-negative density threshold.
pub fn parse_density(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;

    if !(value.is_finite() && value >= 0.0) {
        return Err(format!("density must be a non-negative number, got {value}"));
    }

    Ok(value)
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.parse()
        .map_err(|_| format!("'{s}' is not a valid number"))
}

//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::{Config, VisualizationConfig};
use crate::error::ConfigError;

/// Maximum allowed label width in characters.
pub const MAX_CHARS_PER_LINE: usize = 200;

/// Maximum allowed label height in lines.
pub const MAX_LINES_LIMIT: usize = 50;

/// Validate layout parameters.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `CHARS_PER_LINE` must be between 1 and 200
/// - `MAX_LINES` must be between 1 and 50
pub fn validate_layout(config: &VisualizationConfig) -> Result<(), ConfigError> {
    check_range("CHARS_PER_LINE", config.max_chars_per_line, MAX_CHARS_PER_LINE)?;
    check_range("MAX_LINES", config.max_lines, MAX_LINES_LIMIT)
}

/// Validate application configuration.
///
/// Only the overrides that are set are checked.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if an override is out of range.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(width) = config.chars_per_line {
        check_range("CHARS_PER_LINE", width, MAX_CHARS_PER_LINE)?;
    }
    if let Some(lines) = config.max_lines {
        check_range("MAX_LINES", lines, MAX_LINES_LIMIT)?;
    }
    Ok(())
}

fn check_range(var: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::InvalidValue {
            var: var.into(),
            reason: format!("must be between 1 and {max}"),
        });
    }
    Ok(())
}

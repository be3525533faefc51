//! Configuration management.
//!
//! This module handles:
//! - Layout parameters for diagram labels ([`VisualizationConfig`])
//! - Environment variable loading for the binary ([`Config`])
//! - Configuration validation
//!
//! # Example
//!
//! ```
//! use reasongraph::config::VisualizationConfig;
//! use reasongraph::methods::ReasoningMethod;
//!
//! let config = VisualizationConfig::for_method(ReasoningMethod::BeamSearch);
//! assert_eq!(config.max_chars_per_line, 40);
//! assert_eq!(config.max_lines, 8);
//! ```

mod validation;

pub use validation::{validate_config, validate_layout, MAX_CHARS_PER_LINE, MAX_LINES_LIMIT};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::methods::ReasoningMethod;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default label width in characters.
pub const DEFAULT_CHARS_PER_LINE: usize = 40;

/// Default label height for sequential diagrams.
pub const DEFAULT_MAX_LINES: usize = 4;

/// Default label height for multi-branch diagrams (tree, beam search).
pub const DEFAULT_BRANCHING_MAX_LINES: usize = 8;

/// Layout parameters consumed by the text fitter and every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualizationConfig {
    /// Maximum characters per label line.
    pub max_chars_per_line: usize,
    /// Maximum lines per label.
    pub max_lines: usize,
}

impl VisualizationConfig {
    /// Create a validated layout configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if either value is zero or
    /// above its limit (see [`validate_layout`]).
    pub fn new(max_chars_per_line: usize, max_lines: usize) -> Result<Self, ConfigError> {
        let config = Self {
            max_chars_per_line,
            max_lines,
        };
        validate_layout(&config)?;
        Ok(config)
    }

    /// Default layout for a reasoning method.
    ///
    /// Tree and beam search diagrams get taller labels.
    #[must_use]
    pub const fn for_method(method: ReasoningMethod) -> Self {
        let max_lines = match method {
            ReasoningMethod::Tree | ReasoningMethod::BeamSearch => DEFAULT_BRANCHING_MAX_LINES,
            ReasoningMethod::Chain
            | ReasoningMethod::LeastToMost
            | ReasoningMethod::SelfConsistency
            | ReasoningMethod::SelfRefine => DEFAULT_MAX_LINES,
        };
        Self {
            max_chars_per_line: DEFAULT_CHARS_PER_LINE,
            max_lines,
        }
    }
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            max_chars_per_line: DEFAULT_CHARS_PER_LINE,
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// Unset layout values fall back to the per-method defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Label width override.
    pub chars_per_line: Option<usize>,
    /// Label height override.
    pub max_lines: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            chars_per_line: None,
            max_lines: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `CHARS_PER_LINE`: Label width (default: `40`)
    /// - `MAX_LINES`: Label height (default: `4`, or `8` for tree and beam search)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layout value is not a positive integer
    /// or fails validation (see [`validate_config`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let chars_per_line = parse_env_usize("CHARS_PER_LINE")?;
        let max_lines = parse_env_usize("MAX_LINES")?;

        let config = Self {
            log_level,
            chars_per_line,
            max_lines,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Layout for a method: overrides applied on top of its defaults.
    #[must_use]
    pub fn visualization_for(&self, method: ReasoningMethod) -> VisualizationConfig {
        let defaults = VisualizationConfig::for_method(method);
        VisualizationConfig {
            max_chars_per_line: self.chars_per_line.unwrap_or(defaults.max_chars_per_line),
            max_lines: self.max_lines.unwrap_or(defaults.max_lines),
        }
    }
}

/// Parse an optional environment variable as usize.
fn parse_env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
    std::env::var(name).map_or(Ok(None), |val| {
        val.trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: name.into(),
                reason: "must be a positive integer".into(),
            })
    })
}

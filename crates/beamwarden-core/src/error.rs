//! Error types for configuration loading and validation.

use thiserror::Error;

/// Errors raised while building controller parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("view angle {view} must exceed twice the margin {margin}")]
    ViewTooNarrow { view: f64, margin: f64 },

    #[error("approximate narrow threshold {approx} exceeds narrow threshold {narrow}")]
    ThresholdOrder { approx: u32, narrow: u32 },

    #[error("filter gain ceiling must be at least 2")]
    GainCeiling,

    #[error("segment {name} is inverted: [{start}, {end}]")]
    InvertedSegment {
        name: &'static str,
        start: f64,
        end: f64,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

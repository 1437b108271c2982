//! Configuration error types
//!
//! Out-of-range values are rejected at construction rather than clamped, so a
//! caller (or a test) can always observe why a configuration was refused.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A scalar parameter is outside its allowed range
    #[error("{name} = {value} is out of range (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// A parameter is NaN or infinite
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    /// Polygon needs at least three sides
    #[error("polygon_sides = {0} is too small (need at least 3)")]
    TooFewSides(u32),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `SimulationConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Check that `value` is finite
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name })
    }
}

/// Check that `value` is finite and strictly positive
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "> 0",
        })
    }
}

/// Check that `value` is finite and within [0, 1]
pub(crate) fn ensure_unit(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    ensure_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, 1]",
        })
    }
}

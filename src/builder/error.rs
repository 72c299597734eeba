//! Build errors for the calculator builder and display configuration.

use thiserror::Error;

/// Errors that can occur when configuring a calculator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Exponential thresholds must be finite and positive (above: {above}, below: {below})")]
    InvalidThreshold { above: f64, below: f64 },

    #[error("exponential_below ({below}) must be smaller than exponential_above ({above})")]
    ThresholdOrder { above: f64, below: f64 },

    #[error("max_fraction_digits must be at most {max}, got {found}")]
    TooManyFractionDigits { found: usize, max: usize },

    #[error("Invalid display configuration: {0}")]
    Config(#[from] serde_json::Error),
}

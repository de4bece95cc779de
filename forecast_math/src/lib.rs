//! # Forecast Math
//!
//! Numeric building blocks for short-horizon forecasting of daily retail
//! metrics. Everything here works on plain `&[f64]` series:
//!
//! - Additive Holt-Winters (level, trend and seasonal indices)
//! - Simple exponential smoothing
//! - Seasonal run-rate blending
//! - Descriptive statistics used for intervals and correlation

use thiserror::Error;

pub mod holt_winters;
pub mod run_rate;
pub mod smoothing;
pub mod statistics;

pub use holt_winters::{HoltWinters, HoltWintersFit, SeasonalState, SmoothingParams};
pub use run_rate::{RunRateFit, SeasonalRunRate};
pub use smoothing::{ExponentialSmoothing, SmoothingFit};

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Check that a smoothing constant lies in (0, 1]
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(MathError::InvalidInput(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

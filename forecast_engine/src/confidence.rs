//! Confidence intervals from in-sample residuals
//!
//! The standard error is the root mean squared residual of the fitted model.
//! The band has the same width at every step of the horizon.

use forecast_math::statistics::{root_mean_square, z_score};
use serde::{Deserialize, Serialize};

/// Lower and upper bound around one forecast value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Scale both bounds by independent factors
    pub fn scaled(&self, lower_factor: f64, upper_factor: f64) -> Self {
        Self {
            lower: self.lower * lower_factor,
            upper: self.upper * upper_factor,
        }
    }

    /// Whether `value` lies inside the interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Residual-based interval estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEstimate {
    std_error: f64,
    z: f64,
}

impl ConfidenceEstimate {
    /// Estimate the standard error from residuals; no residuals means zero width
    pub fn from_residuals(residuals: &[f64], confidence_level: f64) -> Self {
        Self {
            std_error: root_mean_square(residuals),
            z: z_score(confidence_level),
        }
    }

    /// Root mean squared residual
    pub fn std_error(&self) -> f64 {
        self.std_error
    }

    /// z-score of the configured confidence level
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Half-width of the band
    pub fn margin(&self) -> f64 {
        self.z * self.std_error
    }

    /// Band around one value; the lower bound never drops below zero
    pub fn interval(&self, value: f64) -> Interval {
        let margin = self.margin();
        Interval {
            lower: (value - margin).max(0.0),
            upper: value + margin,
        }
    }
}

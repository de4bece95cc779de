//! Forecasting models for single metric series
//!
//! A [`ForecastModel`] declares which series it can handle through
//! [`ForecastModel::supports`] and produces a [`TrainedForecastModel`].
//! [`ModelChain`] tries models in order and keeps the first that trains.

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// Projected values for consecutive future steps
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl Projection {
    /// Create a new projection
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::InvalidParameter(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Take ownership of the values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug + Send {
    /// Generate forecast for future periods, floored at zero
    fn forecast(&self, horizons: usize) -> Result<Projection>;

    /// In-sample residuals (actual minus fitted)
    fn residuals(&self) -> &[f64];

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a metric series
pub trait ForecastModel: Debug + Send + Sync {
    /// Get the name of the model
    fn name(&self) -> &str;

    /// Whether the model can be trained on this series
    fn supports(&self, data: &[f64]) -> bool;

    /// Train the model on a chronologically sorted series
    fn train(&self, data: &[f64]) -> Result<Box<dyn TrainedForecastModel>>;
}

pub mod chain;
pub mod exponential_smoothing;
pub mod flat;
pub mod holt_winters;
pub mod run_rate;

pub use chain::ModelChain;
pub use exponential_smoothing::ExponentialSmoothing;
pub use flat::ZeroForecast;
pub use holt_winters::HoltWintersModel;
pub use run_rate::SeasonalRunRateModel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_length_check() {
        let projection = Projection::new(vec![1.0, 2.0], 2).unwrap();
        assert_eq!(projection.horizons(), 2);
        assert_eq!(projection.values(), &[1.0, 2.0]);
        assert_eq!(projection.into_values(), vec![1.0, 2.0]);

        assert!(Projection::new(vec![1.0], 3).is_err());
    }
}

//! Exponential smoothing models for time series forecasting

use crate::error::Result;
use crate::models::{ForecastModel, Projection, TrainedForecastModel};
use forecast_math::smoothing;

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    inner: smoothing::ExponentialSmoothing,
}

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    /// Name of the model
    name: String,
    fit: smoothing::SmoothingFit,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            name: "exponential_smoothing".to_string(),
            inner: smoothing::ExponentialSmoothing::new(alpha)?,
        })
    }

    /// Smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.inner.alpha()
    }
}

impl ForecastModel for ExponentialSmoothing {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, data: &[f64]) -> bool {
        !data.is_empty()
    }

    fn train(&self, data: &[f64]) -> Result<Box<dyn TrainedForecastModel>> {
        Ok(Box::new(TrainedExponentialSmoothing {
            name: self.name.clone(),
            fit: self.inner.fit(data)?,
        }))
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn forecast(&self, horizons: usize) -> Result<Projection> {
        // Constant at the last level
        Projection::new(self.fit.forecast(horizons), horizons)
    }

    fn residuals(&self) -> &[f64] {
        &self.fit.residuals
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_forecast() {
        let model = ExponentialSmoothing::new(0.3).unwrap();
        let trained = model.train(&[10.0, 20.0, 30.0, 40.0]).unwrap();

        let values = trained.forecast(5).unwrap().into_values();
        assert_eq!(values.len(), 5);
        assert!(values.windows(2).all(|w| w[0] == w[1]));
        // 10 -> 13 -> 18.1 -> 24.67
        assert!((values[0] - 24.67).abs() < 1e-9);
    }

    #[test]
    fn test_supports_any_nonempty_series() {
        let model = ExponentialSmoothing::new(0.3).unwrap();
        assert!(model.supports(&[5.0]));
        assert!(!model.supports(&[]));
        assert!(model.train(&[]).is_err());
    }

    #[test]
    fn test_parameter_validation() {
        assert!(ExponentialSmoothing::new(1.5).is_err());
        assert_eq!(ExponentialSmoothing::new(0.4).unwrap().alpha(), 0.4);
    }
}

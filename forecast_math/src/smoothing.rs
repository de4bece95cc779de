//! Simple exponential smoothing
//!
//! Used on its own for short series where a seasonal decomposition is not
//! possible: the forecast is the final smoothed level held constant.

use crate::{check_unit_interval, MathError, Result};

/// Simple exponential smoothing with a fixed smoothing factor
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

/// Result of smoothing a whole series
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingFit {
    /// Final smoothed level
    pub level: f64,
    /// One-step-ahead residuals for observations `1..n`
    pub residuals: Vec<f64>,
}

impl ExponentialSmoothing {
    /// Create a new Exponential Smoothing with the specified alpha (smoothing factor)
    pub fn new(alpha: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        Ok(Self { alpha })
    }

    /// Smooth a complete series, collecting one-step-ahead residuals on the way.
    ///
    /// The first value seeds the level.
    pub fn fit(&self, data: &[f64]) -> Result<SmoothingFit> {
        let (first, rest) = data.split_first().ok_or_else(|| {
            MathError::InsufficientData("Cannot smooth an empty series".to_string())
        })?;

        let mut level = *first;
        let mut residuals = Vec::with_capacity(rest.len());
        for &value in rest {
            residuals.push(value - level);
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        Ok(SmoothingFit { level, residuals })
    }

    /// Get the current alpha value
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SmoothingFit {
    /// Forecast `horizon` steps; the level is held constant and floored at zero
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        vec![self.level.max(0.0); horizon]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exponential_smoothing() {
        let es = ExponentialSmoothing::new(0.3).unwrap();

        // 10 -> 0.3*20 + 0.7*10 = 13
        let fit = es.fit(&[10.0, 20.0]).unwrap();
        assert_abs_diff_eq!(fit.level, 13.0, epsilon = 1e-12);
        assert_eq!(fit.residuals, vec![10.0]);

        let forecast = fit.forecast(3);
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|v| (v - 13.0).abs() < 1e-12));
    }

    #[test]
    fn test_single_value_has_no_residuals() {
        let fit = ExponentialSmoothing::new(0.3).unwrap().fit(&[42.0]).unwrap();
        assert_eq!(fit.level, 42.0);
        assert!(fit.residuals.is_empty());
    }

    #[test]
    fn test_residuals_are_one_step_ahead() {
        let fit = ExponentialSmoothing::new(0.5)
            .unwrap()
            .fit(&[4.0, 8.0, 6.0, 10.0])
            .unwrap();

        // Levels 4, 6, 6, 8
        assert_eq!(fit.residuals, vec![4.0, 0.0, 4.0]);
        assert_abs_diff_eq!(fit.level, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_level_is_floored() {
        let fit = ExponentialSmoothing::new(0.5).unwrap().fit(&[-10.0]).unwrap();
        assert_eq!(fit.forecast(2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(ExponentialSmoothing::new(0.0).is_err());
        assert!(ExponentialSmoothing::new(1.2).is_err());
        assert!(ExponentialSmoothing::new(0.3).unwrap().fit(&[]).is_err());
    }
}

//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};
use forecast_math::statistics::{mean, root_mean_square};
use serde::{Deserialize, Serialize};

/// Accuracy of a projection against the values that actually occurred.
///
/// Percentage errors skip days whose actual value is zero, since a day
/// without clicks has no meaningful relative error.
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(format!(
            "Need equal, non-empty forecast and actual series, got {} and {}",
            forecast.len(),
            actual.len()
        )));
    }

    let errors: Vec<f64> = actual.iter().zip(forecast).map(|(a, f)| a - f).collect();
    let absolute: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
    let rmse = root_mean_square(&errors);

    let percentage: Vec<f64> = actual
        .iter()
        .zip(&absolute)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, e)| 100.0 * e / a.abs())
        .collect();

    let symmetric: Vec<f64> = actual
        .iter()
        .zip(forecast)
        .zip(&absolute)
        .map(|((a, f), e)| match a.abs() + f.abs() {
            scale if scale > 0.0 => 200.0 * e / scale,
            _ => 0.0,
        })
        .collect();

    Ok(ForecastAccuracy {
        mae: mean(&absolute),
        mse: rmse * rmse,
        rmse,
        mape: mean(&percentage),
        smape: mean(&symmetric),
    })
}

/// Accuracy of in-sample fitted values against a residual series.
///
/// Residuals are aligned with the tail of `actual`, which holds for every
/// model in this crate.
pub fn fit_accuracy(actual: &[f64], residuals: &[f64]) -> Result<ForecastAccuracy> {
    if residuals.len() > actual.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "More residuals ({}) than observations ({})",
            residuals.len(),
            actual.len()
        )));
    }

    let tail = &actual[actual.len() - residuals.len()..];
    let fitted: Vec<f64> = tail.iter().zip(residuals).map(|(a, r)| a - r).collect();
    forecast_accuracy(&fitted, tail)
}

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_forecast_accuracy() {
        let forecast = [105.0, 106.0, 107.0];
        let actual = [106.0, 107.0, 108.0];
        let accuracy = forecast_accuracy(&forecast, &actual).unwrap();

        assert_abs_diff_eq!(accuracy.mae, 1.0);
        assert_abs_diff_eq!(accuracy.mse, 1.0);
        assert_abs_diff_eq!(accuracy.rmse, 1.0);
        assert!(accuracy.mape > 0.9 && accuracy.mape < 1.0);
        assert!(accuracy.to_string().contains("RMSE"));
    }

    #[test]
    fn test_mape_ignores_zero_actuals() {
        let accuracy = forecast_accuracy(&[1.0, 10.0], &[0.0, 20.0]).unwrap();
        assert_abs_diff_eq!(accuracy.mape, 50.0);
    }

    #[test]
    fn test_fit_accuracy_uses_tail() {
        let actual = [1.0, 2.0, 10.0, 20.0];
        let residuals = [1.0, -2.0];
        let accuracy = fit_accuracy(&actual, &residuals).unwrap();

        assert_abs_diff_eq!(accuracy.mae, 1.5);
        assert!(fit_accuracy(&actual[..1], &residuals).is_err());
        assert!(fit_accuracy(&actual, &[]).is_err());
    }

    #[test]
    fn test_symmetric_error_of_zero_days() {
        let accuracy = forecast_accuracy(&[0.0, 10.0], &[0.0, 30.0]).unwrap();
        // 200 * 20 / 40 on the second day, 0 on the first
        assert_abs_diff_eq!(accuracy.smape, 50.0);
        assert_abs_diff_eq!(accuracy.mse, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(forecast_accuracy(&[1.0], &[1.0, 2.0]).is_err());
    }
}

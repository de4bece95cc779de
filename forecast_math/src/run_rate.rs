//! Seasonal run-rate blending
//!
//! A lightweight alternative to Holt-Winters: an exponentially weighted run
//! rate of the recent window, blended with a same-phase seasonal adjustment
//! taken from the last few cycles.

use crate::{MathError, Result};

/// Number of past cycles averaged for each seasonal phase
const LOOKBACK_CYCLES: usize = 4;

/// Seasonal run-rate model configuration
#[derive(Debug, Clone)]
pub struct SeasonalRunRate {
    period: usize,
    seasonal_weight: f64,
    run_rate_weight: f64,
    window: usize,
}

/// A fitted seasonal run-rate model
#[derive(Debug, Clone)]
pub struct RunRateFit {
    period: usize,
    run_rate: f64,
    adjustments: Vec<f64>,
    seasonal_weight: f64,
    run_rate_weight: f64,
    observations: usize,
    residuals: Vec<f64>,
}

impl SeasonalRunRate {
    /// Create a new model. The weights are normalised to sum to one.
    pub fn new(
        period: usize,
        seasonal_weight: f64,
        run_rate_weight: f64,
        window: usize,
    ) -> Result<Self> {
        if period == 0 || window == 0 {
            return Err(MathError::InvalidInput(
                "Period and window must be greater than zero".to_string(),
            ));
        }
        if seasonal_weight < 0.0 || run_rate_weight < 0.0 {
            return Err(MathError::InvalidInput(
                "Blend weights must be non-negative".to_string(),
            ));
        }

        let total = seasonal_weight + run_rate_weight;
        let (seasonal_weight, run_rate_weight) = if total > 0.0 {
            (seasonal_weight / total, run_rate_weight / total)
        } else {
            (0.5, 0.5)
        };

        Ok(Self {
            period,
            seasonal_weight,
            run_rate_weight,
            window,
        })
    }

    /// Normalised (seasonal, run rate) weights
    pub fn weights(&self) -> (f64, f64) {
        (self.seasonal_weight, self.run_rate_weight)
    }

    /// Fit the run rate and per-phase seasonal adjustments
    pub fn fit(&self, data: &[f64]) -> Result<RunRateFit> {
        if data.is_empty() {
            return Err(MathError::InsufficientData(
                "Cannot compute a run rate from an empty series".to_string(),
            ));
        }

        let run_rate = weighted_run_rate(&data[data.len().saturating_sub(self.window)..]);
        let mean = data.iter().sum::<f64>() / data.len() as f64;

        // Phases past the end of a short series never occur in it
        let phases = self.period.min(data.len());
        let mut recent: Vec<Vec<f64>> = vec![Vec::with_capacity(LOOKBACK_CYCLES); phases];
        for (i, &v) in data.iter().enumerate().rev() {
            let same_phase = &mut recent[i % self.period];
            if same_phase.len() < LOOKBACK_CYCLES {
                same_phase.push(v);
            }
        }

        let adjustments: Vec<f64> = recent
            .iter()
            .map(|values| {
                let pattern = values.iter().sum::<f64>() / values.len() as f64;
                if pattern > 0.0 {
                    pattern - mean
                } else {
                    0.0
                }
            })
            .collect();

        let mut fit = RunRateFit {
            period: self.period,
            run_rate,
            adjustments,
            seasonal_weight: self.seasonal_weight,
            run_rate_weight: self.run_rate_weight,
            observations: data.len(),
            residuals: Vec::new(),
        };
        fit.residuals = data
            .iter()
            .enumerate()
            .map(|(i, &v)| v - fit.blend(i))
            .collect();

        Ok(fit)
    }
}

impl RunRateFit {
    /// Exponentially weighted run rate of the recent window
    pub fn run_rate(&self) -> f64 {
        self.run_rate
    }

    /// In-sample residuals against the blended estimate of each position
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn blend(&self, position: usize) -> f64 {
        let adjustment = self
            .adjustments
            .get(position % self.period)
            .copied()
            .unwrap_or(0.0);
        let value = self.seasonal_weight * (self.run_rate + adjustment)
            + self.run_rate_weight * self.run_rate;
        value.max(0.0)
    }

    /// Project `horizon` steps ahead
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| self.blend(self.observations + h - 1))
            .collect()
    }
}

/// Weighted mean with weights `exp(-1 + i / (m - 1))`, newest value heaviest
fn weighted_run_rate(values: &[f64]) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        m => {
            let weights: Vec<f64> = (0..m)
                .map(|i| (-1.0 + i as f64 / (m - 1) as f64).exp())
                .collect();
            let total: f64 = weights.iter().sum();
            values
                .iter()
                .zip(&weights)
                .map(|(v, w)| v * w / total)
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_weighted_run_rate() {
        assert_eq!(weighted_run_rate(&[]), 0.0);
        assert_eq!(weighted_run_rate(&[42.0]), 42.0);
        assert_abs_diff_eq!(weighted_run_rate(&[5.0, 5.0, 5.0]), 5.0, epsilon = 1e-12);

        // Newer values weigh more
        let rate = weighted_run_rate(&[0.0, 10.0]);
        assert!(rate > 5.0 && rate < 10.0);
    }

    #[test]
    fn test_flat_series() {
        let model = SeasonalRunRate::new(7, 0.5, 0.5, 28).unwrap();
        let fit = model.fit(&[200.0; 21]).unwrap();

        assert_abs_diff_eq!(fit.run_rate(), 200.0, epsilon = 1e-9);
        for v in fit.forecast(7) {
            assert_abs_diff_eq!(v, 200.0, epsilon = 1e-9);
        }
        assert!(fit.residuals().iter().all(|r| r.abs() < 1e-9));
    }

    #[test]
    fn test_seasonal_adjustment_follows_phase() {
        // Every seventh day is a spike
        let data: Vec<f64> = (0..28).map(|i| if i % 7 == 0 { 170.0 } else { 100.0 }).collect();
        let fit = SeasonalRunRate::new(7, 1.0, 0.0, 28)
            .unwrap()
            .fit(&data)
            .unwrap();

        let forecast = fit.forecast(7);
        // Position 28 is phase 0
        assert!(forecast[0] > forecast[1]);
        assert!(forecast[1..].windows(2).all(|w| (w[0] - w[1]).abs() < 1e-9));
    }

    #[test]
    fn test_zero_weights_fall_back_to_even_split() {
        let model = SeasonalRunRate::new(7, 0.0, 0.0, 28).unwrap();
        assert_eq!(model.weights(), (0.5, 0.5));
    }

    #[test]
    fn test_period_longer_than_series() {
        // Only the observed phases get an adjustment
        let fit = SeasonalRunRate::new(1 << 62, 0.5, 0.5, 28)
            .unwrap()
            .fit(&[120.0, 80.0, 100.0])
            .unwrap();

        assert_eq!(fit.adjustments.len(), 3);
        let forecast = fit.forecast(5);
        assert_eq!(forecast.len(), 5);
        assert!(forecast.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_invalid_input() {
        assert!(SeasonalRunRate::new(0, 0.5, 0.5, 28).is_err());
        assert!(SeasonalRunRate::new(7, -1.0, 0.5, 28).is_err());
        assert!(SeasonalRunRate::new(7, 0.5, 0.5, 28).unwrap().fit(&[]).is_err());
    }
}

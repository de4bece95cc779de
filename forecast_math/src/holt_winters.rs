//! Additive Holt-Winters (triple exponential smoothing)
//!
//! The model keeps three components:
//! - a level, the deseasonalised baseline
//! - a trend, the smoothed per-step change of the level
//! - one additive seasonal index per phase of the cycle
//!
//! Fitting is a single forward pass with fixed smoothing constants. There is
//! no parameter search.

use crate::{check_unit_interval, MathError, Result};
use serde::{Deserialize, Serialize};

/// Smoothing constants for level, trend and seasonal updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing
    pub gamma: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.1,
        }
    }
}

impl SmoothingParams {
    /// Create validated smoothing constants, each in (0, 1]
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        check_unit_interval("Beta", beta)?;
        check_unit_interval("Gamma", gamma)?;
        Ok(Self { alpha, beta, gamma })
    }
}

/// Level, trend and seasonal indices of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalState {
    pub level: f64,
    pub trend: f64,
    /// Additive offsets indexed by `position % period`
    pub seasonal: Vec<f64>,
}

impl SeasonalState {
    /// Initialise the components from the first two full cycles of `data`.
    ///
    /// Each seasonal index is the average of its phase over every complete
    /// cycle, minus the mean of the first cycle. The trend is the difference
    /// between the second and first cycle means spread over one cycle, and
    /// the level starts at the first observation.
    pub fn initialize(data: &[f64], period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Seasonal period must be greater than zero".to_string(),
            ));
        }
        let required = period.checked_mul(2).ok_or_else(|| {
            MathError::InvalidInput(format!("Seasonal period {} is too large", period))
        })?;
        if data.len() < required {
            return Err(MathError::InsufficientData(format!(
                "Seasonal initialisation needs {} observations, have {}",
                required,
                data.len()
            )));
        }

        let cycles = data.len() / period;
        let first_mean = data[..period].iter().sum::<f64>() / period as f64;
        let second_mean = data[period..2 * period].iter().sum::<f64>() / period as f64;

        let seasonal = (0..period)
            .map(|phase| {
                let sum: f64 = (0..cycles).map(|c| data[phase + c * period]).sum();
                sum / cycles as f64 - first_mean
            })
            .collect();

        Ok(Self {
            level: data[0],
            trend: (second_mean - first_mean) / period as f64,
            seasonal,
        })
    }

    /// Length of the seasonal cycle
    pub fn period(&self) -> usize {
        self.seasonal.len()
    }

    /// One-step-ahead estimate for the observation at `index`
    pub fn one_step(&self, index: usize) -> f64 {
        self.level + self.trend + self.seasonal[index % self.period()]
    }

    /// Fold the observation at `index` into the state
    pub fn update(&mut self, index: usize, value: f64, params: &SmoothingParams) {
        let phase = index % self.period();
        let last_level = self.level;
        let last_seasonal = self.seasonal[phase];

        self.level =
            params.alpha * (value - last_seasonal) + (1.0 - params.alpha) * (last_level + self.trend);
        self.trend = params.beta * (self.level - last_level) + (1.0 - params.beta) * self.trend;
        self.seasonal[phase] =
            params.gamma * (value - self.level) + (1.0 - params.gamma) * last_seasonal;
    }

    /// Project `horizon` steps past a series of `observations` values.
    ///
    /// Step `h` uses the seasonal index of its own phase, so every step can
    /// be computed independently of the others. Values are floored at zero.
    pub fn project(&self, observations: usize, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| {
                let seasonal = self.seasonal[(observations + h - 1) % self.period()];
                (self.level + h as f64 * self.trend + seasonal).max(0.0)
            })
            .collect()
    }
}

/// Additive Holt-Winters model with a fixed seasonal period
#[derive(Debug, Clone)]
pub struct HoltWinters {
    period: usize,
    params: SmoothingParams,
}

/// A fitted Holt-Winters model
#[derive(Debug, Clone)]
pub struct HoltWintersFit {
    state: SeasonalState,
    observations: usize,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
}

impl HoltWinters {
    /// Create a new model for the given seasonal period
    pub fn new(period: usize, params: SmoothingParams) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Seasonal period must be greater than zero".to_string(),
            ));
        }
        SmoothingParams::new(params.alpha, params.beta, params.gamma)?;

        Ok(Self { period, params })
    }

    /// Seasonal period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing constants
    pub fn params(&self) -> SmoothingParams {
        self.params
    }

    /// Smallest series this model can be fitted to
    pub fn min_observations(&self) -> usize {
        self.period.saturating_mul(2)
    }

    /// Walk the series once, updating level, trend and seasonal indices.
    ///
    /// In-sample fitted values are the one-step-ahead estimates taken before
    /// each update and are aligned with `data[period..]`; the first cycle has
    /// no fitted counterpart.
    pub fn fit(&self, data: &[f64]) -> Result<HoltWintersFit> {
        let mut state = SeasonalState::initialize(data, self.period)?;
        let mut fitted = Vec::with_capacity(data.len() - self.period);

        for (i, &value) in data.iter().enumerate() {
            if i >= self.period {
                fitted.push(state.one_step(i));
            }
            state.update(i, value, &self.params);
        }

        let residuals = data[self.period..]
            .iter()
            .zip(&fitted)
            .map(|(actual, estimate)| actual - estimate)
            .collect();

        Ok(HoltWintersFit {
            state,
            observations: data.len(),
            fitted,
            residuals,
        })
    }
}

impl HoltWintersFit {
    /// Final state after the update pass
    pub fn state(&self) -> &SeasonalState {
        &self.state
    }

    /// Number of observations the model was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// In-sample fitted values aligned with `data[period..]`
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// `data[period + i] - fitted[i]`
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Project `horizon` steps ahead
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        self.state.project(self.observations, horizon)
    }
}

//! Seasonal run-rate model

use crate::error::Result;
use crate::models::{ForecastModel, Projection, TrainedForecastModel};
use forecast_math::{RunRateFit, SeasonalRunRate};

/// Run rate of the recent window blended with same-weekday adjustments
#[derive(Debug, Clone)]
pub struct SeasonalRunRateModel {
    name: String,
    inner: SeasonalRunRate,
}

/// Trained seasonal run-rate model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalRunRate {
    name: String,
    fit: RunRateFit,
}

impl SeasonalRunRateModel {
    /// Create a new model; weights are normalised to sum to one
    pub fn new(
        period: usize,
        seasonal_weight: f64,
        run_rate_weight: f64,
        recent_window_days: usize,
    ) -> Result<Self> {
        Ok(Self {
            name: "seasonal_run_rate".to_string(),
            inner: SeasonalRunRate::new(
                period,
                seasonal_weight,
                run_rate_weight,
                recent_window_days,
            )?,
        })
    }
}

impl ForecastModel for SeasonalRunRateModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, data: &[f64]) -> bool {
        !data.is_empty()
    }

    fn train(&self, data: &[f64]) -> Result<Box<dyn TrainedForecastModel>> {
        Ok(Box::new(TrainedSeasonalRunRate {
            name: self.name.clone(),
            fit: self.inner.fit(data)?,
        }))
    }
}

impl TrainedForecastModel for TrainedSeasonalRunRate {
    fn forecast(&self, horizons: usize) -> Result<Projection> {
        Projection::new(self.fit.forecast(horizons), horizons)
    }

    fn residuals(&self) -> &[f64] {
        self.fit.residuals()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

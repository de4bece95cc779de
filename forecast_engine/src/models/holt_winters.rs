//! Holt-Winters model for series with at least two seasonal cycles

use crate::error::Result;
use crate::models::{ForecastModel, Projection, TrainedForecastModel};
use forecast_math::{HoltWinters, HoltWintersFit, SmoothingParams};

/// Additive Holt-Winters forecast model
#[derive(Debug, Clone)]
pub struct HoltWintersModel {
    /// Name of the model
    name: String,
    inner: HoltWinters,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    fit: HoltWintersFit,
}

impl HoltWintersModel {
    /// Create a new Holt-Winters model
    pub fn new(period: usize, params: SmoothingParams) -> Result<Self> {
        Ok(Self {
            name: "holt_winters".to_string(),
            inner: HoltWinters::new(period, params)?,
        })
    }
}

impl ForecastModel for HoltWintersModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, data: &[f64]) -> bool {
        data.len() >= self.inner.min_observations()
    }

    fn train(&self, data: &[f64]) -> Result<Box<dyn TrainedForecastModel>> {
        Ok(Box::new(TrainedHoltWinters {
            name: self.name.clone(),
            fit: self.inner.fit(data)?,
        }))
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
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

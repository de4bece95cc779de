//! Last-resort flat forecast

use crate::error::Result;
use crate::models::{ForecastModel, Projection, TrainedForecastModel};

/// Always-available model that projects zero
#[derive(Debug, Clone, Default)]
pub struct ZeroForecast;

/// Trained zero model
#[derive(Debug, Clone, Default)]
pub struct TrainedZeroForecast;

impl ForecastModel for ZeroForecast {
    fn name(&self) -> &str {
        "flat_zero"
    }

    fn supports(&self, _data: &[f64]) -> bool {
        true
    }

    fn train(&self, _data: &[f64]) -> Result<Box<dyn TrainedForecastModel>> {
        Ok(Box::new(TrainedZeroForecast))
    }
}

impl TrainedForecastModel for TrainedZeroForecast {
    fn forecast(&self, horizons: usize) -> Result<Projection> {
        Projection::new(vec![0.0; horizons], horizons)
    }

    fn residuals(&self) -> &[f64] {
        &[]
    }

    fn name(&self) -> &str {
        "flat_zero"
    }
}

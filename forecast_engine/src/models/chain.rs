//! Ordered fallback chain of forecast models

use crate::config::{ForecastConfig, MethodKind};
use crate::error::{ForecastError, Result};
use crate::models::{
    ExponentialSmoothing, ForecastModel, HoltWintersModel, SeasonalRunRateModel,
    TrainedForecastModel, ZeroForecast,
};
use log::{debug, warn};

/// Models tried in order until one supports the series and trains
#[derive(Debug, Default)]
pub struct ModelChain {
    models: Vec<Box<dyn ForecastModel>>,
}

impl ModelChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model to the end of the chain
    pub fn with_model(mut self, model: impl ForecastModel + 'static) -> Self {
        self.models.push(Box::new(model));
        self
    }

    /// Primary method from the config, then simple smoothing, then zero
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        let chain = match config.method {
            MethodKind::HoltWinters => Self::new().with_model(HoltWintersModel::new(
                config.seasonal_period,
                config.smoothing()?,
            )?),
            MethodKind::SeasonalRunRate => Self::new().with_model(SeasonalRunRateModel::new(
                config.seasonal_period,
                config.seasonal_weight,
                config.run_rate_weight,
                config.recent_window_days,
            )?),
        };

        Ok(chain
            .with_model(ExponentialSmoothing::new(config.alpha)?)
            .with_model(ZeroForecast))
    }

    /// Names of the models in order
    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    /// Train the first model that supports `data` and trains without error
    pub fn train(&self, data: &[f64]) -> Result<Box<dyn TrainedForecastModel>> {
        for (position, model) in self.models.iter().enumerate() {
            if !model.supports(data) {
                debug!(
                    "{} does not support a series of {} points",
                    model.name(),
                    data.len()
                );
                continue;
            }

            match model.train(data) {
                Ok(trained) => {
                    if position > 0 {
                        warn!(
                            "Falling back to {} for a series of {} points",
                            trained.name(),
                            data.len()
                        );
                    }
                    return Ok(trained);
                }
                Err(e) => warn!("{} failed to train: {}", model.name(), e),
            }
        }

        Err(ForecastError::DataError(format!(
            "No model in the chain could handle a series of {} points",
            data.len()
        )))
    }
}

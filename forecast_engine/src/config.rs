//! Forecast configuration
//!
//! Every field has a default, so a partial JSON or TOML document is enough.
//!
//! ```
//! use forecast_engine::config::{ForecastConfig, ForecastMode};
//!
//! let config = ForecastConfig::from_json_str(r#"{"forecast_days": 7, "mode": "single"}"#).unwrap();
//! assert_eq!(config.forecast_days, 7);
//! assert_eq!(config.mode, ForecastMode::Single);
//! assert_eq!(config.seasonal_period, 7);
//! ```

use crate::error::{ForecastError, Result};
use forecast_math::SmoothingParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Seed used for volatility sampling when none is configured
pub const DEFAULT_VOLATILITY_SEED: u64 = 0x5EED_F0CA_57;

/// Longest accepted forecast horizon, ten years of days
pub const MAX_FORECAST_DAYS: usize = 3650;

/// Longest accepted seasonal cycle, one year of days
pub const MAX_SEASONAL_PERIOD: usize = 366;

/// Longest accepted run-rate window
pub const MAX_RECENT_WINDOW_DAYS: usize = 366;

/// Which shape of forecast to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMode {
    /// One metric projected on its own
    Single,
    /// Clicks projected, revenue derived from the revenue-per-click ratio
    #[default]
    Correlated,
    /// Correlated projection with historical-scale noise re-injected
    Volatility,
}

/// Metric forecast in single mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Clicks,
    Revenue,
}

impl Metric {
    /// Wire name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Clicks => "clicks",
            Metric::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary projection method tried before the fallbacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    HoltWinters,
    SeasonalRunRate,
}

/// Configuration of a forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of days to project
    pub forecast_days: usize,
    /// Length of the seasonal cycle in days
    pub seasonal_period: usize,
    pub mode: ForecastMode,
    /// Metric for single mode
    pub metric: Metric,
    pub method: MethodKind,
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing
    pub gamma: f64,
    /// Reported with correlation metrics; does not change the projection
    pub correlation_strength: f64,
    /// Share of historical volatility re-injected in volatility mode
    pub volatility_factor: f64,
    /// 0.90, 0.95 or 0.99; other values use z = 1.96
    pub confidence_level: f64,
    pub include_confidence: bool,
    /// Older name for `include_confidence`
    pub include_volatility: bool,
    pub volatility_seed: Option<u64>,
    pub seasonal_weight: f64,
    pub run_rate_weight: f64,
    pub recent_window_days: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let smoothing = SmoothingParams::default();
        Self {
            forecast_days: 14,
            seasonal_period: 7,
            mode: ForecastMode::default(),
            metric: Metric::default(),
            method: MethodKind::default(),
            alpha: smoothing.alpha,
            beta: smoothing.beta,
            gamma: smoothing.gamma,
            correlation_strength: 0.85,
            volatility_factor: 0.7,
            confidence_level: 0.95,
            include_confidence: false,
            include_volatility: false,
            volatility_seed: None,
            seasonal_weight: 0.5,
            run_rate_weight: 0.5,
            recent_window_days: 28,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.json` or `.toml` configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            other => Err(ForecastError::ConfigError(format!(
                "Unsupported config extension: {:?}",
                other
            ))),
        }
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<()> {
        for (name, value, max) in [
            ("forecast_days", self.forecast_days, MAX_FORECAST_DAYS),
            ("seasonal_period", self.seasonal_period, MAX_SEASONAL_PERIOD),
            ("recent_window_days", self.recent_window_days, MAX_RECENT_WINDOW_DAYS),
        ] {
            if value == 0 || value > max {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be in 1..={}, got {}",
                    name, max, value
                )));
            }
        }

        self.smoothing()?;

        for (name, value) in [
            ("correlation_strength", self.correlation_strength),
            ("volatility_factor", self.volatility_factor),
            ("seasonal_weight", self.seasonal_weight),
            ("run_rate_weight", self.run_rate_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Validated Holt-Winters smoothing constants
    pub fn smoothing(&self) -> Result<SmoothingParams> {
        Ok(SmoothingParams::new(self.alpha, self.beta, self.gamma)?)
    }

    /// Whether confidence bands should be attached
    pub fn confidence_enabled(&self) -> bool {
        self.include_confidence || self.include_volatility
    }

    /// Seed for volatility sampling
    pub fn seed(&self) -> u64 {
        self.volatility_seed.unwrap_or(DEFAULT_VOLATILITY_SEED)
    }

    pub fn with_forecast_days(mut self, days: usize) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    pub fn with_mode(mut self, mode: ForecastMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_method(mut self, method: MethodKind) -> Self {
        self.method = method;
        self
    }

    pub fn with_confidence(mut self, level: f64) -> Self {
        self.include_confidence = true;
        self.confidence_level = level;
        self
    }

    pub fn with_volatility_factor(mut self, factor: f64) -> Self {
        self.volatility_factor = factor;
        self
    }

    pub fn with_volatility_seed(mut self, seed: u64) -> Self {
        self.volatility_seed = Some(seed);
        self
    }
}

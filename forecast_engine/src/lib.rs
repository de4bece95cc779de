//! # Forecast Engine
//!
//! Per-category click and revenue forecasting for retail analytics.
//!
//! ## Features
//!
//! - Additive Holt-Winters smoothing with weekly seasonality
//! - Seasonal run-rate blending as an alternative primary method
//! - Automatic fallback to exponential smoothing and then to a zero forecast
//! - Revenue derived from clicks through the historical revenue per click
//! - Residual-based confidence bands
//! - Seeded re-injection of historical volatility
//!
//! ## Forecast Modes
//!
//! - **Single**: one metric projected on its own
//! - **Correlated**: clicks projected, revenue following through the ratio
//! - **Volatility**: correlated projection with sampled day-to-day noise
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use forecast_engine::{ForecastConfig, ForecastEngine, HistoricalDataPoint};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let history: Vec<HistoricalDataPoint> = (0..28)
//!     .map(|d| HistoricalDataPoint::new(start + Duration::days(d), "Electronics", 1000.0, 500.0))
//!     .collect();
//!
//! let engine = ForecastEngine::new(ForecastConfig::default().with_forecast_days(7)).unwrap();
//! let results = engine.forecast(&history);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].len(), 7);
//! ```

pub mod confidence;
pub mod config;
pub mod correlation;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod output;
pub mod utils;
pub mod volatility;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, ForecastMode, MethodKind, Metric};
pub use crate::data::{CategorySeries, HistoricalDataPoint};
pub use crate::engine::{generate_forecast, ForecastEngine};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ForecastModel, ModelChain, TrainedForecastModel};
pub use crate::output::{ForecastPoint, ForecastResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

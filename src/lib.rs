//! # Retail Forecast
//!
//! `retail_forecast` bundles the forecasting workspace crates behind one
//! dependency.
//!
//! - [`math`]: smoothing recursions and descriptive statistics
//! - [`engine`]: per-category click and revenue forecasting
//!
//! ## Example
//!
//! ```
//! use retail_forecast::{generate_forecast, ForecastConfig, ForecastMode, HistoricalDataPoint};
//!
//! let history = vec![
//!     HistoricalDataPoint::from_raw("2025-01-01", "Toys", "120", "60.5").unwrap(),
//!     HistoricalDataPoint::from_raw("2025-01-02", "Toys", "135", "70").unwrap(),
//! ];
//! let config = ForecastConfig::default().with_mode(ForecastMode::Single);
//!
//! let results = generate_forecast(&history, &config).unwrap();
//! assert_eq!(results[0].category(), "Toys");
//! assert_eq!(results[0].len(), 14);
//! ```

pub use forecast_engine as engine;
pub use forecast_math as math;

pub use forecast_engine::{
    generate_forecast, CategorySeries, ForecastConfig, ForecastEngine, ForecastError,
    ForecastMode, ForecastPoint, ForecastResult, HistoricalDataPoint, MethodKind, Metric,
};

/// Version of the workspace facade
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_reexports() {
        let config = ForecastConfig::default();
        assert_eq!(config.forecast_days, 14);
        assert_eq!(math::statistics::mean(&[1.0, 3.0]), 2.0);
        assert!(!VERSION.is_empty());
    }
}

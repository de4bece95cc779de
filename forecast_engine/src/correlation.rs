//! Revenue derived from projected clicks
//!
//! Revenue is not smoothed on its own. It follows the clicks projection
//! through the historical revenue-per-click ratio.

use crate::confidence::Interval;
use forecast_math::statistics::{coefficient_of_variation, mean, pearson_correlation};
use log::warn;
use serde::{Deserialize, Serialize};

/// Multiplicative slack applied to revenue bands derived from clicks bands
pub const REVENUE_BAND_SLACK: f64 = 0.1;

/// Per-day revenue/clicks ratios over days with clicks
pub fn daily_ratios(clicks: &[f64], revenue: &[f64]) -> Vec<f64> {
    clicks
        .iter()
        .zip(revenue)
        .filter(|(&c, _)| c > 0.0)
        .map(|(c, r)| r / c)
        .collect()
}

/// Mean revenue per click; days with zero clicks are left out.
///
/// A history without any clicks yields 0, so revenue is projected as 0.
pub fn revenue_per_click(clicks: &[f64], revenue: &[f64]) -> f64 {
    let ratios = daily_ratios(clicks, revenue);
    if ratios.is_empty() && !clicks.is_empty() {
        warn!("No day with clicks in history; revenue per click set to 0");
    }
    mean(&ratios)
}

/// Revenue projection for a clicks projection
pub fn derive_revenue(clicks_forecast: &[f64], ratio: f64) -> Vec<f64> {
    clicks_forecast.iter().map(|c| c * ratio).collect()
}

/// Revenue band from a clicks band, widened by the fixed slack
pub fn revenue_band(clicks_band: &Interval, ratio: f64) -> Interval {
    clicks_band.scaled(ratio * (1.0 - REVENUE_BAND_SLACK), ratio * (1.0 + REVENUE_BAND_SLACK))
}

/// Relationship between clicks and revenue in history and forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMetrics {
    /// Revenue per click used for the projection
    pub revenue_per_click: f64,
    /// Pearson correlation of historical clicks and revenue
    pub historical_correlation: f64,
    /// Pearson correlation of projected clicks and revenue
    pub forecast_correlation: f64,
    /// Mean revenue per click over projected days with clicks
    pub forecast_rpc_mean: f64,
    /// Dispersion of the historical daily ratios
    pub rpc_coefficient_of_variation: f64,
    /// Requested correlation strength, reported as given
    pub correlation_strength: f64,
}

impl CorrelationMetrics {
    /// Summarise history and projection of one category
    pub fn compute(
        history_clicks: &[f64],
        history_revenue: &[f64],
        forecast_clicks: &[f64],
        forecast_revenue: &[f64],
        ratio: f64,
        correlation_strength: f64,
    ) -> Self {
        Self {
            revenue_per_click: ratio,
            historical_correlation: pearson_correlation(history_clicks, history_revenue),
            forecast_correlation: pearson_correlation(forecast_clicks, forecast_revenue),
            forecast_rpc_mean: mean(&daily_ratios(forecast_clicks, forecast_revenue)),
            rpc_coefficient_of_variation: coefficient_of_variation(&daily_ratios(
                history_clicks,
                history_revenue,
            )),
            correlation_strength,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ratio_skips_zero_click_days() {
        let clicks = [10.0, 0.0, 20.0];
        let revenue = [20.0, 99.0, 60.0];
        // (2 + 3) / 2
        assert_abs_diff_eq!(revenue_per_click(&clicks, &revenue), 2.5);
    }

    #[test]
    fn test_ratio_without_clicks() {
        assert_eq!(revenue_per_click(&[0.0, 0.0], &[5.0, 5.0]), 0.0);
        assert_eq!(revenue_per_click(&[], &[]), 0.0);
    }

    #[test]
    fn test_derived_revenue_and_band() {
        let revenue = derive_revenue(&[10.0, 20.0], 2.0);
        assert_eq!(revenue, vec![20.0, 40.0]);

        let band = revenue_band(&Interval { lower: 8.0, upper: 12.0 }, 2.0);
        assert_abs_diff_eq!(band.lower, 14.4, epsilon = 1e-12);
        assert_abs_diff_eq!(band.upper, 26.4, epsilon = 1e-12);
        assert!(band.contains(20.0));
    }

    #[test]
    fn test_metrics() {
        let clicks = [10.0, 20.0, 30.0, 40.0];
        let revenue = [20.0, 40.0, 60.0, 80.0];
        let metrics =
            CorrelationMetrics::compute(&clicks, &revenue, &[50.0, 60.0], &[100.0, 120.0], 2.0, 0.85);

        assert_abs_diff_eq!(metrics.historical_correlation, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.forecast_correlation, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.forecast_rpc_mean, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics.rpc_coefficient_of_variation, 0.0, epsilon = 1e-12);
        assert_eq!(metrics.correlation_strength, 0.85);
    }
}

//! Forecast orchestration
//!
//! [`ForecastEngine`] groups history by category, picks a model for each
//! series through the [`ModelChain`] and shapes the projection according to
//! the configured mode. The engine holds configuration only, so one instance
//! can serve any number of calls from any thread.

use crate::confidence::{ConfidenceEstimate, Interval};
use crate::config::{ForecastConfig, ForecastMode, Metric};
use crate::correlation::{derive_revenue, revenue_band, revenue_per_click, CorrelationMetrics};
use crate::data::{group_by_category, CategorySeries, HistoricalDataPoint};
use crate::error::Result;
use crate::metrics::fit_accuracy;
use crate::models::{flat::TrainedZeroForecast, ModelChain, TrainedForecastModel};
use crate::output::{
    CorrelatedBands, CorrelatedForecast, CorrelatedPoint, ForecastPoint, ForecastResult,
    ModelSummary, SingleMetricForecast, SingleMetricPoint, VolatilityForecast, VolatilityPoint,
};
use crate::utils::{future_dates, round2};
use crate::volatility::{category_seed, VolatilityInjector};
use chrono::NaiveDate;
use log::{debug, info};
use rayon::prelude::*;

/// Projection of one metric with its fit diagnostics
struct MetricProjection {
    values: Vec<f64>,
    confidence: ConfidenceEstimate,
    summary: ModelSummary,
}

/// Per-category forecaster for a fixed configuration
#[derive(Debug)]
pub struct ForecastEngine {
    config: ForecastConfig,
    chain: ModelChain,
}

impl ForecastEngine {
    /// Validate the configuration and build the model chain
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        let chain = ModelChain::from_config(&config)?;
        Ok(Self { config, chain })
    }

    /// Configuration in use
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast every category in `history`.
    ///
    /// Categories are independent and computed in parallel; the output is in
    /// ascending category order. Numeric problems in the input never fail
    /// the call, they degrade to simpler models or zero.
    pub fn forecast(&self, history: &[HistoricalDataPoint]) -> Vec<ForecastResult> {
        let series: Vec<CategorySeries> = group_by_category(history)
            .into_iter()
            .map(|(category, points)| CategorySeries::from_points(category, &points))
            .collect();

        info!(
            "Forecasting {} categories, {} days, {:?} mode",
            series.len(),
            self.config.forecast_days,
            self.config.mode
        );

        series
            .par_iter()
            .map(|s| self.forecast_series(s))
            .collect()
    }

    /// Forecast a single prepared category series
    pub fn forecast_series(&self, series: &CategorySeries) -> ForecastResult {
        let dates = series
            .last_date()
            .map(|last| future_dates(last, self.config.forecast_days))
            .unwrap_or_default();

        match self.config.mode {
            ForecastMode::Single => self.single(series, &dates),
            ForecastMode::Correlated => self.correlated(series, &dates),
            ForecastMode::Volatility => self.volatility(series, &dates),
        }
    }

    fn project(&self, values: &[f64], horizon: usize) -> MetricProjection {
        let trained: Box<dyn TrainedForecastModel> = self
            .chain
            .train(values)
            .unwrap_or_else(|_| Box::new(TrainedZeroForecast));

        let projected = trained
            .forecast(horizon)
            .map(|p| p.into_values())
            .unwrap_or_else(|_| vec![0.0; horizon]);

        let residuals = trained.residuals();
        let confidence = ConfidenceEstimate::from_residuals(residuals, self.config.confidence_level);
        let summary = ModelSummary {
            method: trained.name().to_string(),
            std_error: confidence.std_error(),
            accuracy: fit_accuracy(values, residuals).ok(),
        };

        MetricProjection {
            values: projected,
            confidence,
            summary,
        }
    }

    fn single(&self, series: &CategorySeries, dates: &[NaiveDate]) -> ForecastResult {
        let metric = self.config.metric;
        let projection = self.project(series.values(metric), dates.len());
        debug!(
            "{}: {} projected with {}",
            series.category(),
            metric,
            projection.summary.method
        );

        let forecasts = dates
            .iter()
            .zip(&projection.values)
            .map(|(&date, &value)| {
                let (clicks, revenue) = match metric {
                    Metric::Clicks => (value, 0.0),
                    Metric::Revenue => (0.0, value),
                };
                SingleMetricPoint {
                    point: point(date, clicks, revenue),
                    metric,
                    interval: self
                        .config
                        .confidence_enabled()
                        .then(|| rounded(projection.confidence.interval(value))),
                }
            })
            .collect();

        ForecastResult::Single(SingleMetricForecast {
            category: series.category().to_string(),
            metric,
            forecasts,
            summary: projection.summary,
        })
    }

    fn correlated(&self, series: &CategorySeries, dates: &[NaiveDate]) -> ForecastResult {
        let clicks = self.project(series.clicks(), dates.len());
        let ratio = revenue_per_click(series.clicks(), series.revenue());
        let revenue = derive_revenue(&clicks.values, ratio);
        debug!(
            "{}: clicks projected with {}, revenue per click {:.4}",
            series.category(),
            clicks.summary.method,
            ratio
        );

        let forecasts = dates
            .iter()
            .zip(clicks.values.iter().zip(&revenue))
            .map(|(&date, (&c, &r))| {
                let bands = self.config.confidence_enabled().then(|| {
                    let clicks_band = clicks.confidence.interval(c);
                    let revenue_bounds = revenue_band(&clicks_band, ratio);
                    CorrelatedBands {
                        clicks_lower: round2(clicks_band.lower),
                        clicks_upper: round2(clicks_band.upper),
                        revenue_lower: round2(revenue_bounds.lower),
                        revenue_upper: round2(revenue_bounds.upper),
                    }
                });
                CorrelatedPoint {
                    point: point(date, c, r),
                    bands,
                }
            })
            .collect();

        ForecastResult::Correlated(CorrelatedForecast {
            category: series.category().to_string(),
            forecasts,
            correlation_metrics: CorrelationMetrics::compute(
                series.clicks(),
                series.revenue(),
                &clicks.values,
                &revenue,
                ratio,
                self.config.correlation_strength,
            ),
            summary: clicks.summary,
        })
    }

    fn volatility(&self, series: &CategorySeries, dates: &[NaiveDate]) -> ForecastResult {
        let clicks = self.project(series.clicks(), dates.len());
        let ratio = revenue_per_click(series.clicks(), series.revenue());
        let revenue_smooth = derive_revenue(&clicks.values, ratio);

        let injector = VolatilityInjector::new(
            self.config.volatility_factor,
            clicks.confidence.z(),
            category_seed(self.config.seed(), series.category()),
        );
        let overlay = injector.inject(
            series.clicks(),
            series.revenue(),
            &clicks.values,
            &revenue_smooth,
        );
        debug!(
            "{}: {:.0}% of historical volatility preserved",
            series.category(),
            overlay.metrics.volatility_preserved_pct
        );

        let forecasts = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let c = overlay.clicks.values[i];
                let r = overlay.revenue.values[i];
                VolatilityPoint {
                    point: point(date, c, r),
                    clicks_smooth: round2(overlay.clicks.smooth[i]),
                    clicks_lower: round2(overlay.clicks.lower[i]),
                    clicks_upper: round2(overlay.clicks.upper[i]),
                    revenue_smooth: round2(overlay.revenue.smooth[i]),
                    revenue_lower: round2(overlay.revenue.lower[i]),
                    revenue_upper: round2(overlay.revenue.upper[i]),
                    rpc: if c > 0.0 { round2(r / c) } else { 0.0 },
                }
            })
            .collect();

        ForecastResult::Volatility(VolatilityForecast {
            category: series.category().to_string(),
            forecasts,
            correlation_metrics: CorrelationMetrics::compute(
                series.clicks(),
                series.revenue(),
                &overlay.clicks.values,
                &overlay.revenue.values,
                ratio,
                self.config.correlation_strength,
            ),
            volatility_metrics: overlay.metrics,
            summary: clicks.summary,
        })
    }
}

fn point(date: NaiveDate, clicks: f64, revenue: f64) -> ForecastPoint {
    ForecastPoint {
        date,
        clicks_forecast: round2(clicks),
        revenue_forecast: round2(revenue),
    }
}

fn rounded(interval: Interval) -> Interval {
    Interval {
        lower: round2(interval.lower),
        upper: round2(interval.upper),
    }
}

/// Validate `config` and forecast `history` in one call
pub fn generate_forecast(
    history: &[HistoricalDataPoint],
    config: &ForecastConfig,
) -> Result<Vec<ForecastResult>> {
    Ok(ForecastEngine::new(config.clone())?.forecast(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MethodKind;
    use chrono::Duration;

    fn flat_history(category: &str, days: i64, clicks: f64, revenue: f64) -> Vec<HistoricalDataPoint> {
        let start: NaiveDate = "2025-01-01".parse().unwrap();
        (0..days)
            .map(|d| HistoricalDataPoint::new(start + Duration::days(d), category, clicks, revenue))
            .collect()
    }

    #[test]
    fn test_flat_two_week_history() {
        let config = ForecastConfig::default().with_forecast_days(7);
        let engine = ForecastEngine::new(config).unwrap();
        let results = engine.forecast(&flat_history("Electronics", 14, 1000.0, 500.0));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].summary().method, "holt_winters");
        for p in results[0].points() {
            assert!((p.clicks_forecast - 1000.0).abs() < 0.01);
            assert!((p.revenue_forecast - 500.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_short_history_falls_back() {
        let config = ForecastConfig::default().with_mode(ForecastMode::Single);
        let engine = ForecastEngine::new(config).unwrap();
        let history: Vec<HistoricalDataPoint> = [10.0, 40.0, 20.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                HistoricalDataPoint::new(
                    "2025-03-01".parse::<NaiveDate>().unwrap() + Duration::days(i as i64),
                    "Garden",
                    c,
                    c,
                )
            })
            .collect();

        let results = engine.forecast(&history);
        let result = &results[0];
        assert_eq!(result.summary().method, "exponential_smoothing");
        assert_eq!(result.len(), 14);

        let first = result.points()[0].clicks_forecast;
        assert!(result.points().iter().all(|p| p.clicks_forecast == first));
        assert!(result.points().iter().all(|p| p.revenue_forecast == 0.0));
    }

    #[test]
    fn test_seasonal_run_rate_primary() {
        let config = ForecastConfig::default().with_method(MethodKind::SeasonalRunRate);
        let engine = ForecastEngine::new(config).unwrap();
        let results = engine.forecast(&flat_history("Books", 21, 300.0, 150.0));

        assert_eq!(results[0].summary().method, "seasonal_run_rate");
        assert!(results[0]
            .points()
            .iter()
            .all(|p| (p.clicks_forecast - 300.0).abs() < 0.01));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ForecastConfig::default().with_forecast_days(0);
        assert!(ForecastEngine::new(config).is_err());
    }

    #[test]
    fn test_empty_history() {
        let engine = ForecastEngine::new(ForecastConfig::default()).unwrap();
        assert!(engine.forecast(&[]).is_empty());
    }
}

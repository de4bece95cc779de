//! Forecast result types, one per forecast mode
//!
//! All variants serialise as `{category, forecasts: [...]}` plus their own
//! metric blocks, with a `mode` tag naming the variant.

use crate::confidence::Interval;
use crate::config::{ForecastMode, Metric};
use crate::correlation::CorrelationMetrics;
use crate::error::Result;
use crate::metrics::ForecastAccuracy;
use crate::volatility::VolatilityMetrics;
use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Date and point forecast of both metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub clicks_forecast: f64,
    pub revenue_forecast: f64,
}

/// Which model produced a result and how well it fit history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Name of the model chosen by the fallback chain
    pub method: String,
    /// Root mean squared in-sample residual
    pub std_error: f64,
    /// In-sample accuracy, absent when the model has no residuals
    pub accuracy: Option<ForecastAccuracy>,
}

/// Single mode point; only the forecast metric carries a band
#[derive(Debug, Clone, PartialEq)]
pub struct SingleMetricPoint {
    pub point: ForecastPoint,
    pub metric: Metric,
    pub interval: Option<Interval>,
}

impl Serialize for SingleMetricPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.interval.is_some() { 5 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("date", &self.point.date)?;
        map.serialize_entry("clicks_forecast", &self.point.clicks_forecast)?;
        map.serialize_entry("revenue_forecast", &self.point.revenue_forecast)?;
        if let Some(interval) = &self.interval {
            map.serialize_entry(&format!("{}_lower", self.metric), &interval.lower)?;
            map.serialize_entry(&format!("{}_upper", self.metric), &interval.upper)?;
        }
        map.end()
    }
}

/// Single metric forecast of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleMetricForecast {
    pub category: String,
    pub metric: Metric,
    pub forecasts: Vec<SingleMetricPoint>,
    pub summary: ModelSummary,
}

/// Confidence bands of both metrics in correlated mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedBands {
    pub clicks_lower: f64,
    pub clicks_upper: f64,
    pub revenue_lower: f64,
    pub revenue_upper: f64,
}

/// Correlated mode point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPoint {
    #[serde(flatten)]
    pub point: ForecastPoint,
    #[serde(flatten)]
    pub bands: Option<CorrelatedBands>,
}

/// Correlated forecast of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedForecast {
    pub category: String,
    pub forecasts: Vec<CorrelatedPoint>,
    pub correlation_metrics: CorrelationMetrics,
    pub summary: ModelSummary,
}

/// Volatility mode point; the base forecast carries the noisy values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    #[serde(flatten)]
    pub point: ForecastPoint,
    pub clicks_smooth: f64,
    pub clicks_lower: f64,
    pub clicks_upper: f64,
    pub revenue_smooth: f64,
    pub revenue_lower: f64,
    pub revenue_upper: f64,
    /// Revenue per click of this day, 0 without clicks
    pub rpc: f64,
}

/// Volatility forecast of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityForecast {
    pub category: String,
    pub forecasts: Vec<VolatilityPoint>,
    pub correlation_metrics: CorrelationMetrics,
    pub volatility_metrics: VolatilityMetrics,
    pub summary: ModelSummary,
}

/// Forecast of one category in the shape of its mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ForecastResult {
    Single(SingleMetricForecast),
    Correlated(CorrelatedForecast),
    Volatility(VolatilityForecast),
}

impl ForecastResult {
    /// Category label
    pub fn category(&self) -> &str {
        match self {
            ForecastResult::Single(f) => &f.category,
            ForecastResult::Correlated(f) => &f.category,
            ForecastResult::Volatility(f) => &f.category,
        }
    }

    /// Mode that produced this result
    pub fn mode(&self) -> ForecastMode {
        match self {
            ForecastResult::Single(_) => ForecastMode::Single,
            ForecastResult::Correlated(_) => ForecastMode::Correlated,
            ForecastResult::Volatility(_) => ForecastMode::Volatility,
        }
    }

    /// Base points in date order
    pub fn points(&self) -> Vec<&ForecastPoint> {
        match self {
            ForecastResult::Single(f) => f.forecasts.iter().map(|p| &p.point).collect(),
            ForecastResult::Correlated(f) => f.forecasts.iter().map(|p| &p.point).collect(),
            ForecastResult::Volatility(f) => f.forecasts.iter().map(|p| &p.point).collect(),
        }
    }

    /// Number of forecast days
    pub fn len(&self) -> usize {
        match self {
            ForecastResult::Single(f) => f.forecasts.len(),
            ForecastResult::Correlated(f) => f.forecasts.len(),
            ForecastResult::Volatility(f) => f.forecasts.len(),
        }
    }

    /// Whether the result holds no forecast days
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Model summary
    pub fn summary(&self) -> &ModelSummary {
        match self {
            ForecastResult::Single(f) => &f.summary,
            ForecastResult::Correlated(f) => &f.summary,
            ForecastResult::Volatility(f) => &f.summary,
        }
    }

    /// Serialise to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn base() -> ForecastPoint {
        ForecastPoint {
            date: "2025-01-15".parse().unwrap(),
            clicks_forecast: 1050.0,
            revenue_forecast: 0.0,
        }
    }

    fn summary() -> ModelSummary {
        ModelSummary {
            method: "holt_winters".to_string(),
            std_error: 0.0,
            accuracy: None,
        }
    }

    #[test]
    fn test_single_point_band_keys() {
        let point = SingleMetricPoint {
            point: base(),
            metric: Metric::Clicks,
            interval: Some(Interval {
                lower: 950.0,
                upper: 1150.0,
            }),
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2025-01-15",
                "clicks_forecast": 1050.0,
                "revenue_forecast": 0.0,
                "clicks_lower": 950.0,
                "clicks_upper": 1150.0
            })
        );

        let bare = SingleMetricPoint {
            interval: None,
            ..point
        };
        let value = serde_json::to_value(&bare).unwrap();
        assert!(value.get("clicks_lower").is_none());
    }

    #[test]
    fn test_result_is_tagged() {
        let result = ForecastResult::Single(SingleMetricForecast {
            category: "Electronics".to_string(),
            metric: Metric::Clicks,
            forecasts: vec![SingleMetricPoint {
                point: base(),
                metric: Metric::Clicks,
                interval: None,
            }],
            summary: summary(),
        });

        let value: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["mode"], "single");
        assert_eq!(value["category"], "Electronics");
        assert_eq!(value["forecasts"][0]["clicks_forecast"], 1050.0);
        assert_eq!(result.len(), 1);
        assert_eq!(result.mode(), ForecastMode::Single);
    }

    #[test]
    fn test_correlated_point_without_bands() {
        let point = CorrelatedPoint {
            point: base(),
            bands: None,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}

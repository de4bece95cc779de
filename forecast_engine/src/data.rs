//! Historical input records and per-category series

use crate::config::Metric;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use log::warn;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One day of clicks and revenue for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    /// Calendar day, `YYYY-MM-DD` on the wire
    pub date: NaiveDate,
    /// Category label
    pub category: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub clicks: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub revenue: f64,
}

impl HistoricalDataPoint {
    /// Create a new data point
    pub fn new(date: NaiveDate, category: impl Into<String>, clicks: f64, revenue: f64) -> Self {
        Self {
            date,
            category: category.into(),
            clicks,
            revenue,
        }
    }

    /// Build a point from raw text fields.
    ///
    /// Numeric fields that fail to parse become 0. An unparseable date is an
    /// error because the point cannot be placed on the calendar.
    pub fn from_raw(date: &str, category: &str, clicks: &str, revenue: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            ForecastError::DataError(format!("Invalid date '{}': {}", date.trim(), e))
        })?;

        Ok(Self::new(
            date,
            category.trim(),
            parse_or_zero(clicks),
            parse_or_zero(revenue),
        ))
    }
}

/// Parse a number, falling back to 0
pub fn parse_or_zero(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Coerce a metric value into the non-negative finite range
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(v)) => v,
        Some(RawNumber::Text(s)) => parse_or_zero(&s),
        Some(RawNumber::Other(_)) | None => 0.0,
    })
}

/// Partition records by category, keeping their relative order in each group
pub fn group_by_category(data: &[HistoricalDataPoint]) -> BTreeMap<&str, Vec<&HistoricalDataPoint>> {
    let mut grouped: BTreeMap<&str, Vec<&HistoricalDataPoint>> = BTreeMap::new();

    for point in data {
        grouped.entry(point.category.as_str()).or_default().push(point);
    }

    grouped
}

/// Chronologically sorted metric series of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    category: String,
    dates: Vec<NaiveDate>,
    clicks: Vec<f64>,
    revenue: Vec<f64>,
}

impl CategorySeries {
    /// Sort a category's records by date and extract sanitised metric columns.
    ///
    /// Gaps and duplicate days are not checked; the series is taken as given.
    pub fn from_points(category: &str, points: &[&HistoricalDataPoint]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.date);

        let mut coerced = 0usize;
        let mut clean = |v: f64| {
            let s = sanitize(v);
            if s != v {
                coerced += 1;
            }
            s
        };

        let clicks: Vec<f64> = sorted.iter().map(|p| clean(p.clicks)).collect();
        let revenue: Vec<f64> = sorted.iter().map(|p| clean(p.revenue)).collect();

        if coerced > 0 {
            warn!(
                "Coerced {} negative or non-finite values to 0 in category '{}'",
                coerced, category
            );
        }

        Self {
            category: category.to_string(),
            dates: sorted.iter().map(|p| p.date).collect(),
            clicks,
            revenue,
        }
    }

    /// Category label
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Clicks series
    pub fn clicks(&self) -> &[f64] {
        &self.clicks
    }

    /// Revenue series
    pub fn revenue(&self) -> &[f64] {
        &self.revenue
    }

    /// Series for the requested metric
    pub fn values(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Clicks => &self.clicks,
            Metric::Revenue => &self.revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(date: &str, category: &str, clicks: f64) -> HistoricalDataPoint {
        HistoricalDataPoint::new(date.parse().unwrap(), category, clicks, clicks / 2.0)
    }

    #[test]
    fn test_group_by_category_preserves_order() {
        let data = vec![
            point("2025-01-03", "Toys", 3.0),
            point("2025-01-01", "Books", 1.0),
            point("2025-01-01", "Toys", 1.0),
            point("2025-01-02", "Toys", 2.0),
        ];

        let grouped = group_by_category(&data);
        assert_eq!(grouped.len(), 2);

        let toys: Vec<f64> = grouped["Toys"].iter().map(|p| p.clicks).collect();
        assert_eq!(toys, vec![3.0, 1.0, 2.0]);
        assert_eq!(grouped["Books"].len(), 1);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_series_is_sorted_and_sanitised() {
        let data = vec![
            point("2025-01-03", "Toys", 3.0),
            point("2025-01-01", "Toys", f64::NAN),
            point("2025-01-02", "Toys", -2.0),
        ];
        let grouped = group_by_category(&data);
        let series = CategorySeries::from_points("Toys", &grouped["Toys"]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.clicks(), &[0.0, 0.0, 3.0]);
        assert_eq!(series.last_date(), Some("2025-01-03".parse().unwrap()));
        assert_eq!(series.values(Metric::Revenue), &[0.0, 0.0, 1.5]);
    }

    #[test]
    fn test_from_raw_parse_fallback() {
        let p = HistoricalDataPoint::from_raw("2025-02-01", " Garden ", "12.5", "n/a").unwrap();
        assert_eq!(p.category, "Garden");
        assert_eq!(p.clicks, 12.5);
        assert_eq!(p.revenue, 0.0);

        let err = HistoricalDataPoint::from_raw("01/02/2025", "Garden", "1", "1").unwrap_err();
        assert!(matches!(err, ForecastError::DataError(_)));
    }

    #[test]
    fn test_lenient_deserialization() {
        let json = r#"[
            {"date": "2025-01-01", "category": "A", "clicks": 10, "revenue": "4.5"},
            {"date": "2025-01-02", "category": "A", "clicks": "oops", "revenue": null},
            {"date": "2025-01-03", "category": "A"}
        ]"#;
        let points: Vec<HistoricalDataPoint> = serde_json::from_str(json).unwrap();

        assert_eq!(points[0].clicks, 10.0);
        assert_eq!(points[0].revenue, 4.5);
        assert_eq!(points[1].clicks, 0.0);
        assert_eq!(points[1].revenue, 0.0);
        assert_eq!(points[2].clicks, 0.0);
    }
}

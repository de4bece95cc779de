//! Descriptive statistics over plain series
//!
//! Thin wrappers around `statrs` that return 0 instead of NaN for empty or
//! degenerate input, so callers can always render a number.

use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Arithmetic mean, 0 for an empty series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Population standard deviation, 0 for an empty series
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Root of the mean squared value, 0 for an empty series
pub fn root_mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().quadratic_mean()
}

/// Pearson correlation of two equally long series.
///
/// Returns 0 when either series is constant or the lengths differ.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let sx = population_std_dev(x);
    let sy = population_std_dev(y);
    if sx < f64::EPSILON || sy < f64::EPSILON {
        return 0.0;
    }

    let covariance = x.iter().population_covariance(y.iter());
    (covariance / (sx * sy)).clamp(-1.0, 1.0)
}

/// Standard deviation relative to the mean, 0 when the mean is zero
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m.abs() < f64::EPSILON {
        return 0.0;
    }
    population_std_dev(values) / m
}

/// Empirical percentile (0..=100), 0 for an empty series
pub fn percentile(values: &[f64], p: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut data = Data::new(values.to_vec());
    data.percentile(p.min(100))
}

/// Two-sided z-score for the supported confidence levels.
///
/// 0.90, 0.95 and 0.99 are recognised; anything else maps to 1.96.
pub fn z_score(confidence_level: f64) -> f64 {
    const LEVELS: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

    LEVELS
        .iter()
        .find(|(level, _)| (level - confidence_level).abs() < 1e-9)
        .map(|&(_, z)| z)
        .unwrap_or(1.96)
}

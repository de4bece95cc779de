//! Volatility re-injection on top of a smooth projection
//!
//! Smoothed projections lose the day-to-day spikes seen in history. This
//! module samples historical day-over-day deviations and adds a share of
//! them back, keeping the smooth series alongside for comparison.
//!
//! Sampling is driven by a seeded [`StdRng`], so the same history, config and
//! seed always give the same series.

use forecast_math::statistics::{mean, percentile, population_std_dev};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Percentile of absolute deviations reported as the spike threshold
const SPIKE_PERCENTILE: usize = 95;

/// Day-over-day changes of a series, centred on their mean
pub fn deviation_pool(values: &[f64]) -> Vec<f64> {
    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let drift = mean(&changes);
    changes.into_iter().map(|c| c - drift).collect()
}

/// Derive a per-category seed so categories do not share noise
pub fn category_seed(seed: u64, category: &str) -> u64 {
    // FNV-1a
    category.bytes().fold(seed ^ 0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Summary of the re-injected volatility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityMetrics {
    pub volatility_factor: f64,
    /// Injected clicks noise relative to historical volatility, 0..=100
    pub volatility_preserved_pct: f64,
    pub clicks_volatility_std: f64,
    pub revenue_volatility_std: f64,
    pub clicks_spike_threshold: f64,
    pub revenue_spike_threshold: f64,
}

/// A smooth series with sampled noise and its band
#[derive(Debug, Clone, PartialEq)]
pub struct NoisySeries {
    pub smooth: Vec<f64>,
    pub values: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Clicks and revenue after volatility injection
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityOverlay {
    pub clicks: NoisySeries,
    pub revenue: NoisySeries,
    pub metrics: VolatilityMetrics,
}

/// Injects sampled historical deviations into smooth projections
#[derive(Debug, Clone)]
pub struct VolatilityInjector {
    factor: f64,
    z: f64,
    seed: u64,
}

impl VolatilityInjector {
    /// `factor` in [0, 1] scales the deviations; `z` sets the band width
    pub fn new(factor: f64, z: f64, seed: u64) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            z,
            seed,
        }
    }

    /// Add noise to the smooth clicks and revenue projections.
    ///
    /// Each step draws one historical day; clicks and revenue both take that
    /// day's deviation so their spikes line up.
    pub fn inject(
        &self,
        history_clicks: &[f64],
        history_revenue: &[f64],
        clicks_smooth: &[f64],
        revenue_smooth: &[f64],
    ) -> VolatilityOverlay {
        let clicks_pool = deviation_pool(history_clicks);
        let revenue_pool = deviation_pool(history_revenue);
        let clicks_std = population_std_dev(&clicks_pool);
        let revenue_std = population_std_dev(&revenue_pool);

        let pool_len = clicks_pool.len().min(revenue_pool.len());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let draws: Vec<Option<usize>> = (0..clicks_smooth.len())
            .map(|_| (pool_len > 0).then(|| rng.gen_range(0..pool_len)))
            .collect();

        let clicks = self.apply(clicks_smooth, &clicks_pool, &draws, clicks_std);
        let revenue = self.apply(revenue_smooth, &revenue_pool, &draws, revenue_std);

        let injected: Vec<f64> = clicks
            .values
            .iter()
            .zip(&clicks.smooth)
            .map(|(v, s)| v - s)
            .collect();
        let volatility_preserved_pct = if clicks_std > 0.0 {
            (100.0 * population_std_dev(&injected) / clicks_std).min(100.0)
        } else {
            0.0
        };

        let metrics = VolatilityMetrics {
            volatility_factor: self.factor,
            volatility_preserved_pct,
            clicks_volatility_std: clicks_std,
            revenue_volatility_std: revenue_std,
            clicks_spike_threshold: self.factor * spike_magnitude(&clicks_pool),
            revenue_spike_threshold: self.factor * spike_magnitude(&revenue_pool),
        };

        VolatilityOverlay {
            clicks,
            revenue,
            metrics,
        }
    }

    fn apply(
        &self,
        smooth: &[f64],
        pool: &[f64],
        draws: &[Option<usize>],
        std: f64,
    ) -> NoisySeries {
        let margin = self.z * self.factor * std;
        let mut series = NoisySeries {
            smooth: smooth.to_vec(),
            values: Vec::with_capacity(smooth.len()),
            lower: Vec::with_capacity(smooth.len()),
            upper: Vec::with_capacity(smooth.len()),
        };

        for (&base, draw) in smooth.iter().zip(draws) {
            let noise = draw.map_or(0.0, |j| self.factor * pool[j]);
            let value = (base + noise).max(0.0);
            series.values.push(value);
            series.upper.push(value.max(base + margin));
            series.lower.push(value.min(base - margin).max(0.0));
        }

        series
    }
}

fn spike_magnitude(pool: &[f64]) -> f64 {
    let magnitudes: Vec<f64> = pool.iter().map(|d| d.abs()).collect();
    percentile(&magnitudes, SPIKE_PERCENTILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn spiky_history() -> (Vec<f64>, Vec<f64>) {
        let clicks: Vec<f64> = (0..28)
            .map(|i| if i % 5 == 0 { 180.0 } else { 100.0 + (i % 3) as f64 * 10.0 })
            .collect();
        let revenue = clicks.iter().map(|c| c * 0.5).collect();
        (clicks, revenue)
    }

    #[test]
    fn test_deviation_pool_is_centred() {
        let pool = deviation_pool(&[10.0, 12.0, 14.0, 16.0]);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|d| d.abs() < 1e-12));

        assert!(deviation_pool(&[5.0]).is_empty());
    }

    #[test]
    fn test_zero_factor_keeps_smooth_series() {
        let (clicks, revenue) = spiky_history();
        let smooth = vec![120.0; 7];
        let injector = VolatilityInjector::new(0.0, 1.96, 1);
        let overlay = injector.inject(&clicks, &revenue, &smooth, &vec![60.0; 7]);

        assert_eq!(overlay.clicks.values, smooth);
        assert_eq!(overlay.clicks.upper, smooth);
        assert_eq!(overlay.metrics.volatility_preserved_pct, 0.0);
        assert_eq!(overlay.metrics.clicks_spike_threshold, 0.0);
        assert!(overlay.metrics.clicks_volatility_std > 0.0);
    }

    #[test]
    fn test_bands_contain_values() {
        let (clicks, revenue) = spiky_history();
        let injector = VolatilityInjector::new(1.0, 1.96, 99);
        let overlay = injector.inject(&clicks, &revenue, &vec![40.0; 21], &vec![20.0; 21]);

        for series in [&overlay.clicks, &overlay.revenue] {
            for i in 0..series.values.len() {
                assert!(series.lower[i] >= 0.0);
                assert!(series.lower[i] <= series.values[i]);
                assert!(series.values[i] <= series.upper[i]);
            }
        }
        assert!(overlay.metrics.volatility_preserved_pct > 0.0);
        assert!(overlay.metrics.volatility_preserved_pct <= 100.0);
    }

    #[test]
    fn test_spikes_are_shared_between_metrics() {
        let (clicks, revenue) = spiky_history();
        let injector = VolatilityInjector::new(0.7, 1.96, 5);
        let overlay = injector.inject(&clicks, &revenue, &vec![500.0; 10], &vec![250.0; 10]);

        // Revenue history is exactly half of clicks, so is its noise
        for (c, r) in overlay.clicks.values.iter().zip(&overlay.revenue.values) {
            assert_abs_diff_eq!(c - 500.0, 2.0 * (r - 250.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let (clicks, revenue) = spiky_history();
        let smooth = vec![100.0; 14];
        let a = VolatilityInjector::new(0.7, 1.96, 42).inject(&clicks, &revenue, &smooth, &smooth);
        let b = VolatilityInjector::new(0.7, 1.96, 42).inject(&clicks, &revenue, &smooth, &smooth);
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_history_has_no_noise() {
        let overlay =
            VolatilityInjector::new(1.0, 1.96, 3).inject(&[10.0], &[5.0], &[10.0, 10.0], &[5.0, 5.0]);
        assert_eq!(overlay.clicks.values, vec![10.0, 10.0]);
        assert_eq!(overlay.metrics.clicks_volatility_std, 0.0);
    }

    #[test]
    fn test_category_seed_differs() {
        assert_ne!(category_seed(1, "Toys"), category_seed(1, "Books"));
        assert_eq!(category_seed(1, "Toys"), category_seed(1, "Toys"));
    }
}

use chrono::{Duration, NaiveDate};
use forecast_engine::output::ForecastResult;
use forecast_engine::{ForecastConfig, ForecastEngine, ForecastMode, HistoricalDataPoint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Forecast Engine: Volatility Example");
    println!("===================================\n");

    let history = create_spiky_history();

    for factor in [0.0, 0.5, 1.0] {
        let config = ForecastConfig::default()
            .with_mode(ForecastMode::Volatility)
            .with_forecast_days(10)
            .with_volatility_factor(factor)
            .with_volatility_seed(7);
        let engine = ForecastEngine::new(config)?;

        for result in engine.forecast(&history) {
            if let ForecastResult::Volatility(forecast) = result {
                let metrics = &forecast.volatility_metrics;
                println!(
                    "factor {:.1}: {:.1}% volatility preserved, spike threshold {:.2}",
                    factor, metrics.volatility_preserved_pct, metrics.clicks_spike_threshold
                );
                for point in &forecast.forecasts {
                    println!(
                        "  {}: clicks {:>8.2} (smooth {:>8.2}, band {:>8.2}..{:>8.2})  rpc {:.2}",
                        point.point.date,
                        point.point.clicks_forecast,
                        point.clicks_smooth,
                        point.clicks_lower,
                        point.clicks_upper,
                        point.rpc
                    );
                }
            }
        }
        println!();
    }

    Ok(())
}

fn create_spiky_history() -> Vec<HistoricalDataPoint> {
    let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default();
    (0..35)
        .map(|day| {
            let clicks = if day % 9 == 4 {
                900.0
            } else {
                500.0 + (day % 7) as f64 * 20.0
            };
            HistoricalDataPoint::new(start + Duration::days(day), "Fashion", clicks, clicks * 0.8)
        })
        .collect()
}

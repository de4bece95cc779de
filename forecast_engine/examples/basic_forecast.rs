use chrono::{Duration, NaiveDate};
use forecast_engine::{ForecastConfig, ForecastEngine, ForecastMode, HistoricalDataPoint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Forecast Engine: Basic Forecasting Example");
    println!("==========================================\n");

    let history = create_sample_history();
    println!("Sample history created: {} rows\n", history.len());

    for mode in [ForecastMode::Single, ForecastMode::Correlated] {
        let config = ForecastConfig::default()
            .with_mode(mode)
            .with_forecast_days(7)
            .with_confidence(0.95);
        let engine = ForecastEngine::new(config)?;

        println!("{:?} mode", mode);
        for result in engine.forecast(&history) {
            println!(
                "  {} ({}, std error {:.2})",
                result.category(),
                result.summary().method,
                result.summary().std_error
            );
            for point in result.points() {
                println!(
                    "    {}: clicks {:>8.2}  revenue {:>9.2}",
                    point.date, point.clicks_forecast, point.revenue_forecast
                );
            }
        }
        println!();
    }

    // Full JSON of one result
    let engine = ForecastEngine::new(ForecastConfig::default().with_forecast_days(3))?;
    if let Some(result) = engine.forecast(&history).first() {
        println!("{}", result.to_json()?);
    }

    Ok(())
}

fn create_sample_history() -> Vec<HistoricalDataPoint> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    let weekly = [0.9, 0.95, 1.0, 1.0, 1.1, 1.3, 1.2];
    let mut history = Vec::new();

    for day in 0..42 {
        let date = start + Duration::days(day);
        let season = weekly[day as usize % 7];
        let trend = 1.0 + day as f64 * 0.005;

        let electronics = 1000.0 * season * trend;
        history.push(HistoricalDataPoint::new(date, "Electronics", electronics, electronics * 0.5));

        let garden = 200.0 * season;
        history.push(HistoricalDataPoint::new(date, "Garden", garden, garden * 1.8));
    }

    history
}

//! Utility functions for the forecast_engine crate

use chrono::NaiveDate;

/// Upper bound on the up-front allocation of [`future_dates`]
const MAX_PREALLOCATED_DAYS: usize = 366;

/// Calendar days following `last_date`, one per forecast step.
///
/// Stops early only at the end of the representable calendar.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(horizon.min(MAX_PREALLOCATED_DAYS));
    let mut current = last_date;

    for _ in 0..horizon {
        match current.succ_opt() {
            Some(next) => {
                dates.push(next);
                current = next;
            }
            None => break,
        }
    }

    dates
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

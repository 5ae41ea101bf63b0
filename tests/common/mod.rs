//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use home_energy::engine::{EvaluationInput, TemperatureRange};

/// Evaluation time on the reference day (2024-03-10).
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid reference time")
}

/// Priority table from `(name, priority)` pairs.
pub fn priorities(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
    pairs.iter().map(|(n, p)| (n.to_string(), *p)).collect()
}

/// Default input: price 50 / threshold 100, noon, 20° in (18, 24),
/// 50 of 100 units used, `{Light: 2, Heating: 1}`, no schedules.
pub fn default_input() -> EvaluationInput {
    EvaluationInput {
        current_price: 50.0,
        price_threshold: 100.0,
        device_priorities: priorities(&[("Light", 2), ("Heating", 1)]),
        current_time: at(12, 0),
        current_temperature: 20.0,
        desired_temperature_range: TemperatureRange::new(18.0, 24.0),
        energy_usage_limit: 100.0,
        total_energy_used_today: 50.0,
        scheduled_devices: Vec::new(),
    }
}

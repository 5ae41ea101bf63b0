//! Seeded randomized checks of engine invariants.

mod common;

use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use home_energy::engine::{
    EnergyDecisionEngine, EvaluationInput, ScheduledDevice, TemperatureRange, evaluate,
};

use common::{at, default_input};

const DEVICE_NAMES: &[&str] = &[
    "Light",
    "TV",
    "Security",
    "Refrigerator",
    "Heating",
    "Cooling",
    "Washer",
    "Dryer",
    "Dishwasher",
    "EvCharger",
];

const SAMPLES: usize = 500;

fn random_input(rng: &mut StdRng) -> EvaluationInput {
    let mut device_priorities = std::collections::BTreeMap::new();
    for name in DEVICE_NAMES {
        if rng.random_bool(0.6) {
            device_priorities.insert(name.to_string(), rng.random_range(1..=5));
        }
    }

    let current_time = at(rng.random_range(0..24), rng.random_range(0..60));
    let low = rng.random_range(10.0..25.0);
    let high = low + rng.random_range(0.0..8.0);
    let limit = rng.random_range(0.0..50.0);

    let mut scheduled_devices = Vec::new();
    for _ in 0..rng.random_range(0..3) {
        let name = DEVICE_NAMES[rng.random_range(0..DEVICE_NAMES.len())];
        let time = if rng.random_bool(0.5) {
            current_time
        } else {
            at(rng.random_range(0..24), 0)
        };
        scheduled_devices.push(ScheduledDevice::new(name, time));
    }

    EvaluationInput {
        current_price: rng.random_range(0.0..200.0),
        price_threshold: rng.random_range(0.0..200.0),
        device_priorities,
        current_time,
        current_temperature: rng.random_range(5.0..35.0),
        desired_temperature_range: TemperatureRange::new(low, high),
        energy_usage_limit: limit,
        total_energy_used_today: limit + rng.random_range(-10.0..10.0_f64).max(-limit),
        scheduled_devices,
    }
}

fn for_each_sample(seed: u64, mut check: impl FnMut(&EvaluationInput)) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..SAMPLES {
        check(&random_input(&mut rng));
    }
}

#[test]
fn climate_keys_always_present() {
    for_each_sample(1, |input| {
        let report = evaluate(input).unwrap();
        assert!(report.device_status.get("Heating").is_some());
        assert!(report.device_status.get("Cooling").is_some());
    });
}

#[test]
fn saving_mode_matches_strict_price_comparison() {
    for_each_sample(2, |input| {
        let report = evaluate(input).unwrap();
        assert_eq!(
            report.energy_saving_mode,
            input.current_price > input.price_threshold
        );
    });
}

#[test]
fn shedding_stays_within_one_device_cost() {
    for_each_sample(3, |input| {
        let report = evaluate(input).unwrap();
        assert!(report.total_energy_used <= input.total_energy_used_today);
        if !report.shed_devices.is_empty() {
            assert!(report.total_energy_used >= input.energy_usage_limit - 1.0);
            let credited = report.shed_devices.len() as f64;
            assert!(
                (input.total_energy_used_today - credited - report.total_energy_used).abs()
                    < 1e-9
            );
        }
    });
}

#[test]
fn essential_devices_are_never_shed() {
    for_each_sample(4, |input| {
        let report = evaluate(input).unwrap();
        for device in &report.shed_devices {
            let priority = input.device_priorities.get(device).copied().unwrap_or(1);
            assert!(priority > 1, "{device} (priority {priority}) was shed");
        }
    });
}

#[test]
fn matching_schedules_always_win() {
    for_each_sample(5, |input| {
        let report = evaluate(input).unwrap();
        for entry in &input.scheduled_devices {
            if entry.scheduled_time == input.current_time {
                assert_eq!(report.device_status.get(&entry.device_name), Some(true));
            }
        }
    });
}

#[test]
fn evaluation_is_idempotent() {
    for_each_sample(6, |input| {
        assert_eq!(evaluate(input).unwrap(), evaluate(input).unwrap());
    });
}

#[test]
fn concurrent_evaluations_are_independent() {
    let engine = EnergyDecisionEngine::default();
    let mut rng = StdRng::seed_from_u64(7);
    let inputs: Vec<EvaluationInput> = (0..32).map(|_| random_input(&mut rng)).collect();
    let expected: Vec<_> = inputs.iter().map(|i| engine.evaluate(i).unwrap()).collect();

    let actual: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let engine = &engine;
                s.spawn(move || engine.evaluate(input).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(actual, expected);
}

#[test]
fn fixed_input_gives_fixed_report() {
    let input = default_input();
    let first = evaluate(&input).unwrap();
    for _ in 0..10 {
        assert_eq!(evaluate(&input).unwrap(), first);
    }
}

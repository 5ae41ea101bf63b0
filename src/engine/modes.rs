//! Price- and time-driven mode classification.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use super::policy::{ESSENTIAL_PRIORITY, EnginePolicy};
use super::types::DeviceStatus;

/// Modes active for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub energy_saving: bool,
    pub night: bool,
}

/// Determines saving mode (strictly above threshold) and night mode (by hour).
pub fn classify(
    current_price: f64,
    price_threshold: f64,
    current_time: NaiveDateTime,
    policy: &EnginePolicy,
) -> Modes {
    Modes {
        energy_saving: current_price > price_threshold,
        night: policy.is_night_hour(current_time.hour()),
    }
}

/// Builds the initial device status from priorities and active modes.
///
/// Night mode takes precedence over saving mode. At night only essential
/// devices named in the policy stay on; under saving mode every essential
/// device stays on; otherwise everything is on.
pub fn initial_status(
    priorities: &BTreeMap<String, i32>,
    modes: Modes,
    policy: &EnginePolicy,
) -> DeviceStatus {
    let mut status = DeviceStatus::new();
    for (device, &priority) in priorities {
        let essential = priority <= ESSENTIAL_PRIORITY;
        let on = if modes.night {
            essential && policy.is_night_essential(device)
        } else if modes.energy_saving {
            essential
        } else {
            true
        };
        status.set(device, on);
    }
    debug!(
        saving = modes.energy_saving,
        night = modes.night,
        active = status.active_devices().count(),
        "applied priority policy"
    );
    status
}

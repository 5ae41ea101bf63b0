//! Core engine types: evaluation input, device status map, and decision report.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Desired comfort band for the thermostat, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// Lower bound; heating starts strictly below it.
    pub low: f64,
    /// Upper bound; cooling starts strictly above it.
    pub high: f64,
}

impl TemperatureRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Returns `true` when `temperature` lies within `[low, high]`.
    pub fn contains(&self, temperature: f64) -> bool {
        temperature >= self.low && temperature <= self.high
    }
}

/// Forced-on instruction for one device at an exact point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDevice {
    /// Device to switch on. Need not appear in the priority table.
    pub device_name: String,
    /// Evaluation time at which the override applies.
    pub scheduled_time: NaiveDateTime,
}

impl ScheduledDevice {
    pub fn new(device_name: impl Into<String>, scheduled_time: NaiveDateTime) -> Self {
        Self {
            device_name: device_name.into(),
            scheduled_time,
        }
    }
}

/// Snapshot of conditions and device configuration for a single evaluation.
///
/// The engine only borrows this value; it is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    /// Current energy price.
    pub current_price: f64,
    /// Price above which energy-saving mode activates.
    pub price_threshold: f64,
    /// Device name to priority (lower = more important, 1 = essential).
    pub device_priorities: BTreeMap<String, i32>,
    /// Wall-clock time of the evaluation.
    pub current_time: NaiveDateTime,
    /// Current indoor temperature.
    pub current_temperature: f64,
    /// Comfort band the thermostat regulates towards.
    pub desired_temperature_range: TemperatureRange,
    /// Daily energy cap (>= 0).
    pub energy_usage_limit: f64,
    /// Energy consumed so far today (>= 0).
    pub total_energy_used_today: f64,
    /// Exact-time overrides, applied in order.
    pub scheduled_devices: Vec<ScheduledDevice>,
}

/// On/off state per device, ordered by device name.
///
/// Looking up a device that was never evaluated returns `None`, which is
/// distinct from a device that is known and off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceStatus(BTreeMap<String, bool>);

impl DeviceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the device state, or `None` if the device is not tracked.
    pub fn get(&self, device: &str) -> Option<bool> {
        self.0.get(device).copied()
    }

    /// Returns `true` only for a tracked device that is on.
    pub fn is_on(&self, device: &str) -> bool {
        self.get(device).unwrap_or(false)
    }

    pub fn contains(&self, device: &str) -> bool {
        self.0.contains_key(device)
    }

    /// Sets a device state, inserting the device if it is not yet tracked.
    pub fn set(&mut self, device: &str, on: bool) {
        match self.0.get_mut(device) {
            Some(state) => *state = on,
            None => {
                self.0.insert(device.to_string(), on);
            }
        }
    }

    /// Iterates `(device, on)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, on)| (name.as_str(), *on))
    }

    /// Names of devices that are on, in name order.
    pub fn active_devices(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, on)| *on).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// Whether the price exceeded the saving threshold.
    pub energy_saving_mode: bool,
    /// Whether the evaluation time fell inside the night window.
    pub night_mode: bool,
    /// Final on/off state per device.
    pub device_status: DeviceStatus,
    /// Whether heating or cooling was switched on by the thermostat.
    pub temperature_regulation_active: bool,
    /// Energy used today after crediting shed devices.
    pub total_energy_used: f64,
    /// Devices turned off to respect the energy cap, in shed order.
    pub shed_devices: Vec<String>,
}

impl fmt::Display for DecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "saving={} night={} regulation={} | energy used={:.2}",
            self.energy_saving_mode,
            self.night_mode,
            self.temperature_regulation_active,
            self.total_energy_used,
        )?;
        for (device, on) in self.device_status.iter() {
            let state = if on { "on" } else { "off" };
            writeln!(f, "  {device:<16} {state}")?;
        }
        if !self.shed_devices.is_empty() {
            write!(f, "shed: {}", self.shed_devices.join(", "))?;
        }
        Ok(())
    }
}

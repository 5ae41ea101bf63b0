//! Tunable rules applied by the decision engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Name of the synthetic heating device driven by the thermostat.
pub const HEATING: &str = "Heating";
/// Name of the synthetic cooling device driven by the thermostat.
pub const COOLING: &str = "Cooling";

/// Priority at or below which a device is essential and never shed.
pub const ESSENTIAL_PRIORITY: i32 = 1;

/// Rules governing night mode, load shedding, and the climate devices.
///
/// Defaults reproduce the standard household policy: night from 23:00 to
/// 06:00, security and refrigeration kept on overnight, one energy unit
/// credited per shed device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnginePolicy {
    /// First hour of the night window (inclusive, 0-23).
    pub night_start_hour: u32,
    /// First hour after the night window (exclusive, 0-23).
    pub night_end_hour: u32,
    /// Essential devices that stay on during night mode.
    pub night_essential_devices: Vec<String>,
    /// Energy credited for each device turned off by load shedding.
    pub shed_cost_per_device: f64,
    /// Priority assigned to Heating/Cooling when absent from the priority table.
    pub climate_device_priority: i32,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            night_start_hour: 23,
            night_end_hour: 6,
            night_essential_devices: vec!["Security".to_string(), "Refrigerator".to_string()],
            shed_cost_per_device: 1.0,
            climate_device_priority: ESSENTIAL_PRIORITY,
        }
    }
}

impl EnginePolicy {
    /// Returns `true` when `hour` falls inside the night window.
    ///
    /// A window whose start is after its end wraps around midnight.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        if self.night_start_hour > self.night_end_hour {
            hour >= self.night_start_hour || hour < self.night_end_hour
        } else {
            hour >= self.night_start_hour && hour < self.night_end_hour
        }
    }

    pub fn is_night_essential(&self, device: &str) -> bool {
        self.night_essential_devices.iter().any(|d| d == device)
    }

    /// Checks the policy for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfiguration` naming the first bad field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.night_start_hour > 23 {
            return Err(EngineError::configuration(
                "policy.night_start_hour",
                "must be in 0..=23",
            ));
        }
        if self.night_end_hour > 23 {
            return Err(EngineError::configuration(
                "policy.night_end_hour",
                "must be in 0..=23",
            ));
        }
        if !self.shed_cost_per_device.is_finite() || self.shed_cost_per_device <= 0.0 {
            return Err(EngineError::configuration(
                "policy.shed_cost_per_device",
                "must be a finite value > 0",
            ));
        }
        Ok(())
    }
}

//! TOML-based evaluation requests and preset definitions.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{
    DecisionReport, EnergyDecisionEngine, EnginePolicy, EvaluationInput, ScheduledDevice,
    TemperatureRange,
};
use crate::error::EngineError;

/// Top-level evaluation request parsed from TOML (or JSON via the API).
///
/// All sections have defaults matching the baseline request. Load from
/// TOML with [`RequestConfig::from_toml_file`] or use
/// [`RequestConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    /// Price signal.
    #[serde(default)]
    pub market: MarketConfig,
    /// Evaluation time.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Indoor temperature and comfort band.
    #[serde(default)]
    pub climate: ClimateConfig,
    /// Daily energy cap and consumption so far.
    #[serde(default)]
    pub energy: EnergyConfig,
    /// Device name to priority.
    #[serde(default = "default_devices")]
    pub devices: BTreeMap<String, i32>,
    /// Exact-time overrides.
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    /// Engine policy overrides.
    #[serde(default)]
    pub policy: EnginePolicy,
}

/// Price signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    pub current_price: f64,
    /// Saving mode activates strictly above this price.
    pub price_threshold: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            current_price: 50.0,
            price_threshold: 100.0,
        }
    }
}

/// Evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Local wall-clock time, e.g. `"2024-03-10T12:00:00"`.
    pub current_time: NaiveDateTime,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            current_time: reference_time(12, 0),
        }
    }
}

/// Indoor temperature and comfort band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimateConfig {
    pub current_temperature: f64,
    /// Lower comfort bound (inclusive).
    pub desired_low: f64,
    /// Upper comfort bound (inclusive).
    pub desired_high: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            current_temperature: 20.0,
            desired_low: 18.0,
            desired_high: 24.0,
        }
    }
}

/// Daily energy cap and consumption so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergyConfig {
    /// Daily cap (>= 0).
    pub usage_limit: f64,
    /// Energy already used today (>= 0).
    pub used_today: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            usage_limit: 100.0,
            used_today: 50.0,
        }
    }
}

/// One `[[schedule]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleEntry {
    pub device: String,
    pub time: NaiveDateTime,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"climate.desired_low"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn reference_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn default_devices() -> BTreeMap<String, i32> {
    devices(&[("Light", 2), ("Heating", 1)])
}

fn devices(pairs: &[(&str, i32)]) -> BTreeMap<String, i32> {
    pairs.iter().map(|(n, p)| (n.to_string(), *p)).collect()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl RequestConfig {
    /// Returns the baseline request: normal price, midday, comfortable, under cap.
    pub fn baseline() -> Self {
        Self {
            market: MarketConfig::default(),
            clock: ClockConfig::default(),
            climate: ClimateConfig::default(),
            energy: EnergyConfig::default(),
            devices: default_devices(),
            schedule: Vec::new(),
            policy: EnginePolicy::default(),
        }
    }

    /// Returns the price-spike preset: price above threshold triggers saving mode.
    pub fn price_spike() -> Self {
        Self {
            market: MarketConfig {
                current_price: 150.0,
                ..MarketConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the night preset: late evening, only named essentials stay on.
    pub fn night() -> Self {
        Self {
            clock: ClockConfig {
                current_time: reference_time(23, 30),
            },
            devices: devices(&[("Light", 1), ("TV", 2), ("Security", 1), ("Refrigerator", 1)]),
            ..Self::baseline()
        }
    }

    /// Returns the cold-snap preset: temperature below the comfort band.
    pub fn cold_snap() -> Self {
        Self {
            climate: ClimateConfig {
                current_temperature: 15.0,
                ..ClimateConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the over-cap preset: usage above the daily limit forces shedding.
    pub fn over_cap() -> Self {
        Self {
            energy: EnergyConfig {
                usage_limit: 100.0,
                used_today: 120.0,
            },
            devices: devices(&[("Light", 2), ("TV", 3), ("Security", 1)]),
            ..Self::baseline()
        }
    }

    /// Returns the scheduled preset: an evening schedule entry fires.
    pub fn scheduled() -> Self {
        let evening = reference_time(18, 0);
        Self {
            market: MarketConfig {
                current_price: 150.0,
                ..MarketConfig::default()
            },
            clock: ClockConfig {
                current_time: evening,
            },
            schedule: vec![ScheduleEntry {
                device: "Light".to_string(),
                time: evening,
            }],
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "baseline",
        "price_spike",
        "night",
        "cold_snap",
        "over_cap",
        "scheduled",
    ];

    /// Loads a request from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "price_spike" => Ok(Self::price_spike()),
            "night" => Ok(Self::night()),
            "cold_snap" => Ok(Self::cold_snap()),
            "over_cap" => Ok(Self::over_cap()),
            "scheduled" => Ok(Self::scheduled()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a request from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("request", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a request from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the request is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("market.current_price", self.market.current_price),
            ("market.price_threshold", self.market.price_threshold),
            ("climate.current_temperature", self.climate.current_temperature),
            ("climate.desired_low", self.climate.desired_low),
            ("climate.desired_high", self.climate.desired_high),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number"));
            }
        }

        if self.climate.desired_low > self.climate.desired_high {
            errors.push(ConfigError::new(
                "climate.desired_low",
                "must be <= climate.desired_high",
            ));
        }

        let e = &self.energy;
        if !e.usage_limit.is_finite() || e.usage_limit < 0.0 {
            errors.push(ConfigError::new("energy.usage_limit", "must be >= 0"));
        }
        if !e.used_today.is_finite() || e.used_today < 0.0 {
            errors.push(ConfigError::new("energy.used_today", "must be >= 0"));
        }

        if self.devices.keys().any(String::is_empty) {
            errors.push(ConfigError::new("devices", "device names must not be empty"));
        }
        for (i, entry) in self.schedule.iter().enumerate() {
            if entry.device.is_empty() {
                errors.push(ConfigError::new(
                    format!("schedule[{i}].device"),
                    "must not be empty",
                ));
            }
        }

        if let Err(err) = self.policy.validate() {
            errors.push(ConfigError::new(err.field(), err.to_string()));
        }

        errors
    }

    /// Builds the engine input for this request.
    pub fn to_input(&self) -> EvaluationInput {
        EvaluationInput {
            current_price: self.market.current_price,
            price_threshold: self.market.price_threshold,
            device_priorities: self.devices.clone(),
            current_time: self.clock.current_time,
            current_temperature: self.climate.current_temperature,
            desired_temperature_range: TemperatureRange::new(
                self.climate.desired_low,
                self.climate.desired_high,
            ),
            energy_usage_limit: self.energy.usage_limit,
            total_energy_used_today: self.energy.used_today,
            scheduled_devices: self
                .schedule
                .iter()
                .map(|s| ScheduledDevice::new(s.device.clone(), s.time))
                .collect(),
        }
    }

    /// Builds an engine applying this request's policy.
    pub fn engine(&self) -> EnergyDecisionEngine {
        EnergyDecisionEngine::new(self.policy.clone())
    }

    /// Evaluates this request with its own policy.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the engine rejects the input.
    pub fn evaluate(&self) -> Result<DecisionReport, EngineError> {
        self.engine().evaluate(&self.to_input())
    }
}

//! Decision engine that runs mode classification, thermostat regulation,
//! load shedding, and schedule overrides in one pass.

use tracing::{debug, info};

use crate::error::EngineError;

use super::modes;
use super::policy::EnginePolicy;
use super::schedule::apply_overrides;
use super::shedding::shed_load;
use super::thermostat::regulate;
use super::types::{DecisionReport, EvaluationInput};

/// Stateless energy decision engine.
///
/// Holds only its policy; every call to [`EnergyDecisionEngine::evaluate`]
/// builds its own working device map, so one engine can be shared freely
/// between threads.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use chrono::NaiveDate;
/// use home_energy::engine::{EnergyDecisionEngine, EvaluationInput, TemperatureRange};
///
/// let noon = NaiveDate::from_ymd_opt(2024, 3, 10)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .unwrap();
/// let input = EvaluationInput {
///     current_price: 150.0,
///     price_threshold: 100.0,
///     device_priorities: BTreeMap::from([("Light".to_string(), 2), ("Heating".to_string(), 1)]),
///     current_time: noon,
///     current_temperature: 20.0,
///     desired_temperature_range: TemperatureRange::new(18.0, 24.0),
///     energy_usage_limit: 100.0,
///     total_energy_used_today: 50.0,
///     scheduled_devices: Vec::new(),
/// };
///
/// let report = EnergyDecisionEngine::default().evaluate(&input).unwrap();
/// assert!(report.energy_saving_mode);
/// assert_eq!(report.device_status.get("Light"), Some(false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnergyDecisionEngine {
    policy: EnginePolicy,
}

impl EnergyDecisionEngine {
    /// Creates an engine applying `policy`.
    pub fn new(policy: EnginePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Evaluates one snapshot and returns the resulting decision.
    ///
    /// Phases run in a fixed order, each reading the device map left by the
    /// previous one:
    ///
    /// 1. mode classification and priority policy
    /// 2. thermostat regulation (wins for Heating/Cooling)
    /// 3. load shedding under the energy cap
    /// 4. exact-time schedule overrides (always win)
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfiguration` for an inverted
    /// temperature range or an invalid policy, and
    /// `EngineError::InvalidInput` for negative or non-finite values.
    pub fn evaluate(&self, input: &EvaluationInput) -> Result<DecisionReport, EngineError> {
        self.policy.validate()?;
        validate_input(input)?;

        let modes = modes::classify(
            input.current_price,
            input.price_threshold,
            input.current_time,
            &self.policy,
        );
        let mut status = modes::initial_status(&input.device_priorities, modes, &self.policy);

        let regulating = regulate(
            &mut status,
            input.current_temperature,
            input.desired_temperature_range,
        );

        let outcome = shed_load(
            &mut status,
            &input.device_priorities,
            input.total_energy_used_today,
            input.energy_usage_limit,
            &self.policy,
        );

        let overrides = apply_overrides(&mut status, &input.scheduled_devices, input.current_time);
        debug!(overrides, "schedule overrides applied");

        info!(
            saving = modes.energy_saving,
            night = modes.night,
            regulating,
            shed = outcome.shed.len(),
            energy_used = outcome.energy_used,
            "evaluation complete"
        );

        Ok(DecisionReport {
            energy_saving_mode: modes.energy_saving,
            night_mode: modes.night,
            device_status: status,
            temperature_regulation_active: regulating,
            total_energy_used: outcome.energy_used,
            shed_devices: outcome.shed,
        })
    }
}

/// Evaluates `input` with the default policy.
///
/// # Errors
///
/// See [`EnergyDecisionEngine::evaluate`].
pub fn evaluate(input: &EvaluationInput) -> Result<DecisionReport, EngineError> {
    EnergyDecisionEngine::default().evaluate(input)
}

fn require_finite(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::input(field, "must be a finite number"))
    }
}

fn validate_input(input: &EvaluationInput) -> Result<(), EngineError> {
    require_finite("current_price", input.current_price)?;
    require_finite("price_threshold", input.price_threshold)?;
    require_finite("current_temperature", input.current_temperature)?;

    let range = input.desired_temperature_range;
    require_finite("desired_temperature_range.low", range.low)?;
    require_finite("desired_temperature_range.high", range.high)?;
    if range.low > range.high {
        return Err(EngineError::configuration(
            "desired_temperature_range",
            format!("low ({}) must be <= high ({})", range.low, range.high),
        ));
    }

    for (field, value) in [
        ("energy_usage_limit", input.energy_usage_limit),
        ("total_energy_used_today", input.total_energy_used_today),
    ] {
        require_finite(field, value)?;
        if value < 0.0 {
            return Err(EngineError::input(field, format!("must be >= 0, got {value}")));
        }
    }

    if input.device_priorities.keys().any(String::is_empty) {
        return Err(EngineError::input(
            "device_priorities",
            "device names must not be empty",
        ));
    }
    if input
        .scheduled_devices
        .iter()
        .any(|s| s.device_name.is_empty())
    {
        return Err(EngineError::input(
            "scheduled_devices",
            "device names must not be empty",
        ));
    }

    Ok(())
}

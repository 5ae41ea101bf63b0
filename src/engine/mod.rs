//! Smart-home energy decision engine.

/// Single-pass evaluation entry points.
pub mod decision;
/// Price- and time-driven mode classification.
pub mod modes;
pub mod policy;
/// Exact-time schedule overrides.
pub mod schedule;
pub mod shedding;
/// Thermostat regulation of the climate devices.
pub mod thermostat;
pub mod types;

pub use decision::{EnergyDecisionEngine, evaluate};
pub use policy::EnginePolicy;
pub use types::{DecisionReport, DeviceStatus, EvaluationInput, ScheduledDevice, TemperatureRange};

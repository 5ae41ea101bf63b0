//! Error types reported by the decision engine.

use thiserror::Error;

/// Rejection of an evaluation request.
///
/// The engine is deterministic and side-effect free, so every failure is a
/// caller-input validation failure reported before any phase runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Structurally inconsistent configuration, e.g. an inverted temperature range.
    #[error("invalid configuration: {field}: {message}")]
    InvalidConfiguration { field: String, message: String },
    /// A value outside its permitted domain, e.g. negative energy usage.
    #[error("invalid input: {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl EngineError {
    pub(crate) fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Dotted name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidConfiguration { field, .. } | Self::InvalidInput { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineError;

    #[test]
    fn display_includes_field_and_message() {
        let err = EngineError::input("energy_usage_limit", "must be >= 0");
        assert_eq!(
            err.to_string(),
            "invalid input: energy_usage_limit: must be >= 0"
        );
        assert_eq!(err.field(), "energy_usage_limit");
    }

    #[test]
    fn configuration_variant_is_distinct() {
        let err = EngineError::configuration("desired_temperature_range", "low > high");
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    }
}

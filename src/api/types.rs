//! API response types.

use serde::Serialize;

/// Names of the built-in requests.
#[derive(Debug, Serialize)]
pub struct PresetList {
    pub presets: Vec<String>,
}

/// Error response body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Offending field paths, when validation failed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

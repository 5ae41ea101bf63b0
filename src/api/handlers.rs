//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, PresetList};
use crate::config::RequestConfig;
use crate::engine::DecisionReport;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the decision computed at startup.
///
/// `GET /decision` → 200 + `DecisionReport` JSON
pub async fn get_decision(State(state): State<Arc<AppState>>) -> Json<DecisionReport> {
    Json(state.report.clone())
}

/// Lists the built-in request names.
///
/// `GET /presets` → 200 + `PresetList` JSON
pub async fn list_presets() -> Json<PresetList> {
    Json(PresetList {
        presets: RequestConfig::PRESETS.iter().map(|p| p.to_string()).collect(),
    })
}

/// Evaluates a built-in request.
///
/// `GET /presets/{name}` → 200 + `DecisionReport` JSON
/// `GET /presets/unknown` → 404 + `ErrorResponse`
pub async fn evaluate_preset(
    Path(name): Path<String>,
) -> Result<Json<DecisionReport>, ApiError> {
    let request = RequestConfig::from_preset(&name)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.message))))?;
    run(&request)
}

/// Evaluates a JSON request body.
///
/// `POST /evaluate` → 200 + `DecisionReport` JSON
/// Invalid request → 400 + `ErrorResponse` listing offending fields
pub async fn evaluate(
    Json(request): Json<RequestConfig>,
) -> Result<Json<DecisionReport>, ApiError> {
    let errors = request.validate();
    if !errors.is_empty() {
        warn!(count = errors.len(), "rejected evaluation request");
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message,
                fields: errors.into_iter().map(|e| e.field).collect(),
            }),
        ));
    }
    run(&request)
}

fn run(request: &RequestConfig) -> Result<Json<DecisionReport>, ApiError> {
    request.evaluate().map(Json).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                fields: vec![e.field().to_string()],
            }),
        )
    })
}

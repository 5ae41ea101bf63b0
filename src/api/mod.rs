//! REST API for evaluating requests over HTTP.
//!
//! Provides four endpoints:
//! - `GET /decision`: decision for the request the server was started with
//! - `GET /presets`: names of the built-in requests
//! - `GET /presets/{name}`: decision for a built-in request
//! - `POST /evaluate`: decision for a JSON request body

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::RequestConfig;
use crate::engine::DecisionReport;

pub use types::{ErrorResponse, PresetList};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the startup evaluation and wrapped in `Arc`.
/// Every other request evaluates against its own working copy, so no
/// locks are needed.
pub struct AppState {
    /// Request the server was started with.
    pub request: RequestConfig,
    /// Decision for `request`.
    pub report: DecisionReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decision", get(handlers::get_decision))
        .route("/presets", get(handlers::list_presets))
        .route("/presets/{name}", get(handlers::evaluate_preset))
        .route("/evaluate", post(handlers::evaluate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}

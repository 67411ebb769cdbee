//! Fixed endpoints: service banner and liveness check.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "movescrow-api";

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: &'static str,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Service banner.
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", state.settings.project_name),
        version: state.settings.version.clone(),
        status: "running",
    })
}

/// Liveness check. Does not touch any dependency.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

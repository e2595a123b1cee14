//! Liveness check for orchestration systems.

use axum::Json;
use serde::Serialize;
use tracing::debug;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: &'static str,
    /// Service version information
    pub version: &'static str,
}

/// Reports that the service is up.
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Performing health check");

    Json(HealthResponse { status: "healthy", version: env!("CARGO_PKG_VERSION") })
}

/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "success": true,
///   "message": "healthy",
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "connected"
/// }
/// ```
///
/// An unreachable credential store reports `degraded` with 200 so load
/// balancers can tell a slow database from a dead process.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Upper bound on the store probe
const STORE_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,

    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Credential store status
    pub store: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match timeout(STORE_PROBE_TIMEOUT, state.store.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(error = %e, "Credential store ping failed");
            false
        }
        Err(_) => {
            warn!("Credential store ping timed out");
            false
        }
    };

    let status = if connected { "healthy" } else { "degraded" };

    Json(HealthResponse {
        success: connected,
        message: status.to_string(),
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}

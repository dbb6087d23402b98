use crate::error::{ServerError, ServerResult};
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "contract-intake-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
/// Returns 200 once state (and with it the ingest configuration) is built
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime_seconds(),
    };
    let metrics_status = if state.metrics.is_some() {
        "ready"
    } else {
        "disabled"
    };

    Ok(Json(json!({
        "status": "ready",
        "service": "contract-intake-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "server": metadata,
        "components": {
            "api": "ready",
            "ingest": "ready",
            "metrics": metrics_status,
        },
        "limits": {
            "max_upload_mb": state.config.max_upload_mb,
            "max_records": state.config.ingest.max_records,
        }
    })))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    match &state.metrics {
        Some(handle) if state.config.metrics_enabled => Ok((
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )),
        _ => Err(ServerError::NotFound),
    }
}

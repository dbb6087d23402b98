//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `upload`: Bulk contract uploads (CSV and JSON) and the CSV template

pub mod health;
pub mod upload;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Contract Intake Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Contract Intake Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/contracts/bulk-upload",
            "/api/contracts/bulk-upload/json",
            "/api/contracts/bulk-upload/template",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

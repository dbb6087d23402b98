//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (logging, request ids, compression, etc.)
//! - Logging and metrics installation
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, health, not_found, upload};
use crate::state::ServerState;
use crate::telemetry::{install_prometheus, PrometheusIntakeMetrics};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Service routes: /, /health, /ready, /metrics
/// - Upload routes: /api/contracts/bulk-upload* (body limit applies)
///
/// Middleware stack (applied in reverse order):
/// 1. Trace layer
/// 2. Request logging
/// 3. Request ID tracking
/// 4. CORS
/// 5. Compression
/// 6. Timeout handling
pub fn build_router(state: Arc<ServerState>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let service_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    let upload_routes = Router::new()
        .route("/api/contracts/bulk-upload", post(upload::bulk_upload_csv))
        .route("/api/contracts/bulk-upload/json", post(upload::bulk_upload_json))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()))
        .route("/api/contracts/bulk-upload/template", get(upload::template));

    Router::new()
        .merge(service_routes)
        .merge(upload_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the global tracing subscriber from the configured level and format.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if config.log_json {
        builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    // Already installed (e.g. by an embedding application).
    if let Err(err) = result {
        eprintln!("tracing subscriber not installed: {err}");
    }
}

/// Start the contract intake HTTP server
///
/// Initializes the server with the provided configuration and starts listening
/// for incoming HTTP requests. This function will block until the server is
/// shut down via SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
///
/// # Initialization
///
/// 1. Sets up structured logging with the configured level and format
/// 2. Installs the Prometheus recorder and intake observer (when enabled)
/// 3. Builds the Axum router with all routes and middleware
/// 4. Binds to the configured TCP address
/// 5. Starts the HTTP server with graceful shutdown support
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing(&config);

    let mut state = ServerState::new(config.clone())?;
    if config.metrics_enabled {
        let handle = install_prometheus()?;
        contract_intake::set_intake_metrics(Some(Arc::new(PrometheusIntakeMetrics)));
        state = state.with_metrics(handle);
    }

    let app = build_router(Arc::new(state));
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting contract intake server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max upload: {}MB, Max records: {:?}",
        config.timeout_secs,
        config.max_upload_mb,
        config.ingest.max_records
    );
    tracing::info!(
        "CORS: {}, Metrics: {}",
        config.enable_cors,
        config.metrics_enabled
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    contract_intake::set_intake_metrics(None);
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

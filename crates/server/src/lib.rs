//! Contract Intake Server - HTTP REST API for bulk contract uploads
//!
//! This crate exposes the intake pipeline over HTTP. It supports:
//!
//! - **CSV uploads**: multipart form upload, file under the `file` field
//! - **JSON uploads**: `{ "records": [...] }` request bodies
//! - **Template download**: a CSV header plus sample row to start from
//! - **Health & Metrics**: Liveness/readiness probes and Prometheus metrics
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: Uniform `{ code, message, details }` error bodies
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/contracts/bulk-upload` - CSV upload (multipart)
//! - `POST /api/contracts/bulk-upload/json` - JSON upload
//! - `GET /api/contracts/bulk-upload/template` - CSV template

pub mod config;
pub mod error;
pub mod telemetry;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::{build_router, init_tracing, start_server};
pub use state::ServerState;

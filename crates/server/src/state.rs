use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use ingest::IngestEnv;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Prometheus render handle; `None` when metrics are disabled or no
    /// recorder was installed (tests build routers without one).
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state. Fails when the ingest configuration is invalid.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config
            .ingest
            .validate()
            .map_err(|err| ServerError::Config(err.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            metrics: None,
        })
    }

    /// Attach the Prometheus handle used by `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Ingest capabilities for one request: configured rules, wall clock and
    /// thread-local randomness.
    pub fn ingest_env(&self) -> IngestEnv<'_> {
        IngestEnv::system(&self.config.ingest)
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}

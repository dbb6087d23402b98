use ingest::IngestConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum upload size in MB (multipart file or JSON body)
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Enable permissive CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level / `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human formatter
    #[serde(default = "default_true")]
    pub log_json: bool,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Upload parsing and defaulting rules
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_upload_mb: default_max_upload_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            log_json: default_true(),
            metrics_enabled: default_true(),
            ingest: IngestConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `CONTRACT_INTAKE__*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("CONTRACT_INTAKE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.ingest.validate()?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max upload size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_upload_mb() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

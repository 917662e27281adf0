//! API configuration

use serde::Deserialize;

use domain_share_roll::{EngineConfig, OperationOrder};

/// API configuration
///
/// Every field has a default, so a partially populated environment still
/// yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Operation order used when a request does not choose one
    pub default_operation_order: OperationOrder,
    /// Whether reports include month-end NAV snapshots
    pub capture_nav_snapshots: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            default_operation_order: OperationOrder::default(),
            capture_nav_snapshots: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_operation_order(self.default_operation_order)
            .with_nav_snapshots(self.capture_nav_snapshots)
    }
}

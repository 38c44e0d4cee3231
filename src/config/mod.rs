//! Configuration management for the club platform
//!
//! Loading, validation, and access to all service configuration. The access
//! tables are part of configuration on purpose: widening a grant or moving a
//! role in the hierarchy is a reviewed, versioned change followed by a
//! restart, never an admin-panel mutation.

pub mod models;

pub use models::{AccessConfig, CorsConfig, GrantRule, LoggingConfig, ServerConfig};

use crate::utils::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Access-control tables and overrides
    #[serde(default)]
    pub access: AccessConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment");

        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `CLUBDESK_*` environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CLUBDESK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CLUBDESK_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(level) = std::env::var("CLUBDESK_LOG") {
            self.logging.level = level;
        }
        if let Ok(flag) = std::env::var("CLUBDESK_SEED_DEMO") {
            self.server.seed_demo = flag == "1" || flag.eq_ignore_ascii_case("true");
        }
    }

    /// Validate the entire configuration
    ///
    /// Includes the access-table exhaustiveness checks, so an incomplete
    /// hierarchy override fails here at startup rather than mid-request.
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| AppError::config(format!("Server config error: {}", e)))?;
        self.access
            .validate()
            .map_err(|e| AppError::config(format!("Access config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| AppError::config(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}

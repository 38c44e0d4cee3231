//! Configuration models

use crate::auth::hierarchy::Rank;
use crate::auth::rbac::{Action, Resource};
use crate::core::models::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_age() -> u64 {
    3600
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads; defaults to the actix default when unset
    #[serde(default)]
    pub workers: Option<usize>,
    /// Seed the in-memory store with demo records on startup
    #[serde(default)]
    pub seed_demo: bool,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            seed_demo: false,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must not be 0".to_string());
        }
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("workers must be at least 1 when set".to_string());
            }
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Whether CORS headers are emitted at all
    #[serde(default)]
    pub enabled: bool,
    /// Allowed origins; `*` allows any
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Whether credentials are allowed
    #[serde(default)]
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is accepted
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Access-control configuration
///
/// The built-in tables cover the standing policy; this section carries the
/// reviewed, versioned deviations: a full hierarchy override and additive
/// matrix grants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Role-to-rank override. When present it must rank every declared
    /// role; a partial ladder is a deployment error.
    #[serde(default)]
    pub hierarchy: Option<HashMap<Role, Rank>>,
    /// Additional grants layered over the built-in matrix
    #[serde(default)]
    pub extra_grants: Vec<GrantRule>,
}

impl AccessConfig {
    /// Validate the access tables eagerly.
    ///
    /// Building the hierarchy is the totality check; doing it here means a
    /// bad table aborts startup instead of surfacing as a mid-request deny.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ranks) = &self.hierarchy {
            crate::auth::hierarchy::RoleHierarchy::from_ranks(ranks)
                .map_err(|e| e.to_string())?;
        }
        for rule in &self.extra_grants {
            if rule.actions.is_empty() {
                return Err(format!(
                    "grant for {} on {} lists no actions",
                    rule.role, rule.resource
                ));
            }
        }
        Ok(())
    }
}

/// One additive grant: a role receives actions on a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRule {
    /// Receiving role
    pub role: Role,
    /// Target resource
    pub resource: Resource,
    /// Granted actions
    pub actions: Vec<Action>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (`error`..`trace` or an EnvFilter directive)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON-formatted log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.level.is_empty() {
            return Err("log level must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults_validate() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_grant_rule_is_rejected() {
        let config = AccessConfig {
            hierarchy: None,
            extra_grants: vec![GrantRule {
                role: Role::Staff,
                resource: Resource::Reports,
                actions: Vec::new(),
            }],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn wildcard_origin_detection() {
        let cors = CorsConfig {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            ..Default::default()
        };
        assert!(cors.allows_all_origins());
    }
}

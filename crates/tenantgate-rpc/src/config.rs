//! Server Configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tenantgate_core::GatewayConfig;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid JSON for `ServerConfig`
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path that failed
        path: String,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// gRPC listen address
    pub listen_addr: SocketAddr,
    /// Gateway settings
    pub gateway: GatewayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5002)),
            gateway: GatewayConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply command-line/env overrides on top of file values
    pub fn with_overrides(mut self, listen_addr: Option<SocketAddr>, admin_token: Option<String>) -> Self {
        if let Some(addr) = listen_addr {
            self.listen_addr = addr;
        }
        if let Some(token) = admin_token {
            self.gateway.admin_token = Some(token);
        }
        self
    }
}

//! Gateway Configuration

use serde::{Deserialize, Serialize};

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Cluster admin token; unset or empty leaves creation open
    pub admin_token: Option<String>,
    /// Attempts the issuer makes before giving up on identity collisions
    pub issue_max_attempts: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            admin_token: None,
            issue_max_attempts: 3,
        }
    }
}

impl GatewayConfig {
    /// Config gating creation behind the given admin token
    pub fn with_admin_token(token: impl Into<String>) -> Self {
        Self {
            admin_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Admin secret as the gate sees it
    pub fn admin_secret(&self) -> Option<String> {
        self.admin_token.clone().filter(|t| !t.is_empty())
    }

    /// Issuer attempts, never below one
    pub fn max_attempts(&self) -> u32 {
        self.issue_max_attempts.max(1)
    }
}

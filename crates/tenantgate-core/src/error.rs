//! Error types for TenantGate

use crate::gate::DenyReason;
use thiserror::Error;

/// Credential store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Identifier or secret already registered
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Gateway error type
///
/// Transport-agnostic; the RPC layer owns the mapping to wire status codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Admin gate denied the call
    #[error("permission denied: {reason}")]
    PermissionDenied {
        /// Internal diagnostic, never surfaced to callers
        reason: DenyReason,
    },

    /// Instance token missing or unknown
    #[error("unauthenticated")]
    Unauthenticated,

    /// Issuer exhaustion or store malfunction
    #[error("internal error: {0}")]
    Internal(String),

    /// Caller cancelled before any mutation happened
    #[error("cancelled")]
    Cancelled,
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Result type for TenantGate
pub type GatewayResult<T> = Result<T, GatewayError>;

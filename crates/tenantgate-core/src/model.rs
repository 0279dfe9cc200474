//! Instance identity value objects
//!
//! Both values are immutable once minted. An `InstanceId` is public and may
//! be logged; an `InstanceSecret` must never appear in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Instance identifier (Value Object)
///
/// # Invariants
/// - Backed by a UUIDv4, never reused
/// - Rendered as hyphenated lowercase text on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Mint a fresh random identifier
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from the wire representation
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// Get inner UUID
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Per-instance secret (Value Object)
///
/// # Invariants
/// - Non-empty, hex-encoded
/// - Bound 1:1 to an `InstanceId` once registered
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceSecret(String);

impl InstanceSecret {
    /// Number of random bytes behind a generated secret
    pub const BYTES: usize = 32;

    /// Wrap an already generated secret value
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Encode raw random bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Get inner value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw string handed to the caller
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the secret carries no value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for InstanceSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InstanceSecret(<redacted>)")
    }
}

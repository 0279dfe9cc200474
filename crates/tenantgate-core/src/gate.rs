//! Admin Gate
//!
//! Policy, in order:
//! 1. No admin secret configured → Allow (open cluster)
//! 2. Empty presented token → Deny (missing credential)
//! 3. Presented token differs → Deny (invalid credential)
//! 4. Otherwise → Allow
//!
//! Both deny reasons surface to callers as the same permission error; the
//! distinction exists for diagnostics only.

use crate::token::PresentedToken;
use std::fmt;
use subtle::ConstantTimeEq;

/// Why the gate refused a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No token was presented
    MissingCredential,
    /// A token was presented but did not match
    InvalidCredential,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => f.write_str("missing credential"),
            Self::InvalidCredential => f.write_str("invalid credential"),
        }
    }
}

/// Gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Call may proceed
    Allow,
    /// Call is refused
    Deny(DenyReason),
}

impl Verdict {
    /// Whether the call may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Admin gate
pub struct AdminGate;

impl AdminGate {
    /// Decide whether a creation request is authorized
    pub fn authorize(configured: Option<&str>, presented: &PresentedToken) -> Verdict {
        let Some(expected) = configured else {
            return Verdict::Allow;
        };

        if presented.is_empty() {
            return Verdict::Deny(DenyReason::MissingCredential);
        }

        if constant_time_eq(expected.as_bytes(), presented.as_str().as_bytes()) {
            Verdict::Allow
        } else {
            Verdict::Deny(DenyReason::InvalidCredential)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

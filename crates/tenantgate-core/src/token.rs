//! Token extraction from the per-call request context

use std::fmt;
use tokio_util::sync::CancellationToken;

/// Per-call execution context
///
/// Built by the transport layer for each inbound call and threaded
/// explicitly through the gateway.
#[derive(Clone, Default)]
pub struct RequestContext {
    admin_token: Option<String>,
    instance_token: Option<String>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// Context with no credentials attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the admin token presented by the caller
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Attach the instance token presented by the caller
    pub fn with_instance_token(mut self, token: impl Into<String>) -> Self {
        self.instance_token = Some(token.into());
        self
    }

    /// Tie the call to an external cancellation signal
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Whether the caller has abandoned the call
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("instance_token", &self.instance_token.as_ref().map(|_| "<redacted>"))
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Token value read off a single request
///
/// Empty when the caller attached nothing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PresentedToken(String);

impl PresentedToken {
    /// Wrap a raw token value
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get inner value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether nothing was presented
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PresentedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("PresentedToken(<empty>)")
        } else {
            f.write_str("PresentedToken(<redacted>)")
        }
    }
}

/// Admin token presented on this call, empty if none
pub fn extract_admin_token(ctx: &RequestContext) -> PresentedToken {
    PresentedToken::new(ctx.admin_token.clone().unwrap_or_default())
}

/// Instance token presented on this call, empty if none
pub fn extract_instance_token(ctx: &RequestContext) -> PresentedToken {
    PresentedToken::new(ctx.instance_token.clone().unwrap_or_default())
}

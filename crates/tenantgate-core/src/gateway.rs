//! Authorization Gateway
//!
//! Composes token extraction, the admin gate and the issuer into the
//! caller-facing operations. Per `create` call:
//!
//! ```text
//! Start → TokenExtracted ─┬─ Allowed → Issued → Done(ok)
//!                         └─ Denied ──────────→ Done(err)
//! ```
//!
//! Denied and cancelled calls never touch the credential store.

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gate::{AdminGate, Verdict};
use crate::issuer::InstanceIssuer;
use crate::model::{InstanceId, InstanceSecret};
use crate::store::{CredentialStore, InMemoryCredentialStore};
use crate::token::{self, RequestContext};
use std::sync::Arc;
use tracing::{info, warn};

/// Successful creation result
#[derive(Debug, Clone)]
pub struct CreatedInstance {
    /// Identifier of the new instance
    pub id: InstanceId,
    /// Secret for all later per-instance calls
    pub secret: InstanceSecret,
}

/// Authorization gateway
pub struct AuthorizationGateway {
    store: Arc<dyn CredentialStore>,
    issuer: InstanceIssuer,
}

impl AuthorizationGateway {
    /// Gateway over a fresh in-memory store
    pub fn new(config: &GatewayConfig) -> Self {
        let store = Arc::new(InMemoryCredentialStore::new(config.admin_secret()));
        Self::with_store(store, config.max_attempts())
    }

    /// Gateway over an existing store
    pub fn with_store(store: Arc<dyn CredentialStore>, max_attempts: u32) -> Self {
        let issuer = InstanceIssuer::new(store.clone(), max_attempts);
        Self::with_issuer(store, issuer)
    }

    /// Gateway with a preconfigured issuer sharing the same store
    pub fn with_issuer(store: Arc<dyn CredentialStore>, issuer: InstanceIssuer) -> Self {
        Self { store, issuer }
    }

    /// Underlying credential store
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Whether creation requires the admin token
    pub fn is_admin_gated(&self) -> bool {
        self.store.configured_admin_secret().is_some()
    }

    /// Provision a new instance
    pub async fn create(&self, ctx: &RequestContext) -> GatewayResult<CreatedInstance> {
        self.admit(ctx, "create")?;

        if ctx.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        let (id, secret) = self.issuer.issue().await.map_err(|e| {
            warn!(error = %e, "Instance issuance failed");
            e
        })?;

        info!(instance_id = %id, "Created instance");
        Ok(CreatedInstance { id, secret })
    }

    /// Resolve the presented instance token to its instance
    pub async fn instance_id(&self, ctx: &RequestContext) -> GatewayResult<InstanceId> {
        let presented = token::extract_instance_token(ctx);
        if presented.is_empty() {
            return Err(GatewayError::Unauthenticated);
        }

        match self.store.resolve(presented.as_str()).await? {
            Some(id) => Ok(id),
            None => {
                warn!("Unknown instance token");
                Err(GatewayError::Unauthenticated)
            }
        }
    }

    /// List every registered instance; admin-gated like `create`
    pub async fn list_instances(&self, ctx: &RequestContext) -> GatewayResult<Vec<InstanceId>> {
        self.admit(ctx, "list_instances")?;

        if ctx.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }

        Ok(self.store.instance_ids().await?)
    }

    fn admit(&self, ctx: &RequestContext, operation: &str) -> GatewayResult<()> {
        let presented = token::extract_admin_token(ctx);

        match AdminGate::authorize(self.store.configured_admin_secret(), &presented) {
            Verdict::Allow => Ok(()),
            Verdict::Deny(reason) => {
                warn!(operation, %reason, "Admin gate denied request");
                Err(GatewayError::PermissionDenied { reason })
            }
        }
    }
}

//! Instance Issuer
//!
//! Mints a fresh identity and registers it in the credential store. Only
//! called after the admin gate has allowed the request.

use crate::error::{GatewayError, GatewayResult, StoreError};
use crate::model::{InstanceId, InstanceSecret};
use crate::store::CredentialStore;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of fresh instance identities
pub trait IdentityGenerator: Send + Sync {
    /// Produce a candidate id and secret
    fn generate(&self) -> (InstanceId, InstanceSecret);
}

/// UUIDv4 ids and OS-random secrets
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentityGenerator;

impl IdentityGenerator for RandomIdentityGenerator {
    fn generate(&self) -> (InstanceId, InstanceSecret) {
        let mut bytes = [0u8; InstanceSecret::BYTES];
        OsRng.fill_bytes(&mut bytes);
        (InstanceId::new_v4(), InstanceSecret::from_bytes(&bytes))
    }
}

/// Instance issuer
pub struct InstanceIssuer {
    store: Arc<dyn CredentialStore>,
    generator: Arc<dyn IdentityGenerator>,
    max_attempts: u32,
}

impl InstanceIssuer {
    /// Issuer backed by the random generator
    pub fn new(store: Arc<dyn CredentialStore>, max_attempts: u32) -> Self {
        Self::with_generator(store, Arc::new(RandomIdentityGenerator), max_attempts)
    }

    /// Issuer with a custom identity source
    pub fn with_generator(
        store: Arc<dyn CredentialStore>,
        generator: Arc<dyn IdentityGenerator>,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Allocate and register a new identity
    ///
    /// Retries on `Conflict` up to `max_attempts`; any other store error
    /// aborts immediately.
    pub async fn issue(&self) -> GatewayResult<(InstanceId, InstanceSecret)> {
        for attempt in 1..=self.max_attempts {
            let (id, secret) = self.generator.generate();

            match self.store.register(id, secret.clone()).await {
                Ok(()) => {
                    debug!(instance_id = %id, attempt, "Registered instance credentials");
                    return Ok((id, secret));
                }
                Err(StoreError::Conflict(detail)) => {
                    warn!(attempt, max_attempts = self.max_attempts, %detail, "Instance identity collision");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(GatewayError::Internal(format!(
            "could not allocate a unique instance identity after {} attempts",
            self.max_attempts
        )))
    }
}

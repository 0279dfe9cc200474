//! TenantGate Core - Admin gating and instance identity issuance
//!
//! Decides, for every `Create` call, whether the caller may provision a new
//! tenant instance, and mints the instance's identity and secret atomically.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     AUTHORIZATION GATEWAY                           │
//! │                                                                     │
//! │   RequestContext                                                    │
//! │        │                                                            │
//! │  ┌─────▼──────┐     ┌────────────┐     ┌──────────────────┐         │
//! │  │   Token    │────▶│ Admin Gate │────▶│ Instance Issuer  │         │
//! │  │ Extractor  │     │ Allow/Deny │     │  id + secret     │         │
//! │  └────────────┘     └─────┬──────┘     └────────┬─────────┘         │
//! │                           │ Deny                │ register          │
//! │                           ▼                     ▼                   │
//! │                   PermissionDenied     ┌──────────────────┐         │
//! │                   (no mutation)        │ Credential Store │         │
//! │                                        │ admin + id→secret│         │
//! │                                        └──────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod issuer;
pub mod model;
pub mod store;
pub mod token;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult, StoreError};
pub use gate::{AdminGate, DenyReason, Verdict};
pub use gateway::{AuthorizationGateway, CreatedInstance};
pub use issuer::{IdentityGenerator, InstanceIssuer, RandomIdentityGenerator};
pub use model::{InstanceId, InstanceSecret};
pub use store::{CredentialStore, InMemoryCredentialStore};
pub use token::{PresentedToken, RequestContext};

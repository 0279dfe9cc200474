//! TenantGate RPC - gRPC surface for the authorization gateway
//!
//! Wraps `tenantgate-core` in a tonic service:
//! - Metadata interceptor turning headers into a `RequestContext`
//! - Service implementation for `tenantgate.v1.TenantGate`
//! - Error mapping table from `GatewayError` to `tonic::Status`
//! - Typed client attaching admin/instance tokens
//! - Server bootstrap and configuration

#![warn(missing_docs)]

/// Generated protobuf types and tonic stubs
#[allow(missing_docs)]
pub mod pb {
    tonic::include_proto!("tenantgate.v1");
}

pub mod client;
pub mod config;
pub mod interceptor;
pub mod server;
pub mod service;
pub mod status;

pub use client::GatewayClient;
pub use config::{ConfigError, ServerConfig};
pub use interceptor::{
    TokenInterceptor, ADMIN_TOKEN_METADATA_KEY, INSTANCE_TOKEN_METADATA_KEY,
};
pub use server::{cancel_on_signal, run};
pub use service::TenantGateService;
pub use status::{ErrorCode, ERROR_CODE_METADATA_KEY};

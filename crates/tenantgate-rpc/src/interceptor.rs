//! Metadata interceptor
//!
//! Reads the caller's tokens off gRPC metadata and attaches a
//! `RequestContext` to the request extensions before the service runs.

use tenantgate_core::RequestContext;
use tokio_util::sync::CancellationToken;
use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Metadata key carrying the cluster admin token
pub const ADMIN_TOKEN_METADATA_KEY: &str = "x-tenantgate-admin-token";

/// Metadata key carrying a per-instance token
pub const INSTANCE_TOKEN_METADATA_KEY: &str = "x-tenantgate-instance-token";

/// Builds the per-call `RequestContext`
///
/// Every context is tied to a child of the server's shutdown token, so a
/// shutdown cancels in-flight calls that have not yet written anything.
#[derive(Debug, Clone, Default)]
pub struct TokenInterceptor {
    shutdown: CancellationToken,
}

impl TokenInterceptor {
    /// Interceptor tied to the server shutdown signal
    pub fn new(shutdown: CancellationToken) -> Self {
        Self { shutdown }
    }
}

impl Interceptor for TokenInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let ctx = request_context(request.metadata())
            .with_cancellation(self.shutdown.child_token());

        request.extensions_mut().insert(ctx);
        Ok(request)
    }
}

/// Context from metadata alone, with no cancellation attached
pub fn request_context(metadata: &MetadataMap) -> RequestContext {
    let mut ctx = RequestContext::new();
    if let Some(token) = read_token(metadata, ADMIN_TOKEN_METADATA_KEY) {
        ctx = ctx.with_admin_token(token);
    }
    if let Some(token) = read_token(metadata, INSTANCE_TOKEN_METADATA_KEY) {
        ctx = ctx.with_instance_token(token);
    }
    ctx
}

/// Unreadable values are kept lossily so they fail the comparison
/// instead of counting as absent.
fn read_token(metadata: &MetadataMap, key: &str) -> Option<String> {
    let value = metadata.get(key)?;
    Some(String::from_utf8_lossy(value.as_bytes()).into_owned())
}

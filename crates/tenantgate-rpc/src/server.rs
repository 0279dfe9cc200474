//! Server bootstrap

use crate::config::ServerConfig;
use crate::interceptor::TokenInterceptor;
use crate::pb::tenant_gate_server::TenantGateServer;
use crate::service::TenantGateService;
use std::future::Future;
use std::io;
use std::sync::Arc;
use tenantgate_core::AuthorizationGateway;
use tokio_util::sync::CancellationToken;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Server;

/// Service stack the server mounts
pub fn grpc_service(
    gateway: Arc<AuthorizationGateway>,
    shutdown: CancellationToken,
) -> InterceptedService<TenantGateServer<TenantGateService>, TokenInterceptor> {
    TenantGateServer::with_interceptor(
        TenantGateService::new(gateway),
        TokenInterceptor::new(shutdown),
    )
}

/// Cancel `shutdown` once `signal` fires
///
/// A signal listener that fails to install leaves the server running.
pub async fn cancel_on_signal<F>(signal: F, shutdown: CancellationToken)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
        Err(e) => tracing::error!(error = %e, "Cannot listen for shutdown signal"),
    }
}

/// Serve until `shutdown` is cancelled
pub async fn run(config: ServerConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let gateway = Arc::new(AuthorizationGateway::new(&config.gateway));

    tracing::info!(
        listen_addr = %config.listen_addr,
        admin_gated = gateway.is_admin_gated(),
        "TenantGate listening"
    );

    Server::builder()
        .add_service(grpc_service(gateway, shutdown.clone()))
        .serve_with_shutdown(config.listen_addr, shutdown.cancelled())
        .await?;

    tracing::info!("TenantGate stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_cancels_shutdown() {
        let shutdown = CancellationToken::new();

        cancel_on_signal(async { Ok(()) }, shutdown.clone()).await;

        assert!(shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn test_failed_signal_listener_keeps_serving() {
        let shutdown = CancellationToken::new();

        cancel_on_signal(
            async { Err(io::Error::new(io::ErrorKind::Other, "no signal driver")) },
            shutdown.clone(),
        )
        .await;

        assert!(!shutdown.is_cancelled());
    }
}

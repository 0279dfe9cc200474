//! TenantGate - Main Entry Point

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tenantgate_rpc::ServerConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tenantgate")]
#[command(version)]
#[command(about = "Instance provisioning gateway", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, env = "TENANTGATE_CONFIG")]
    config: Option<PathBuf>,

    /// gRPC listen address
    #[arg(long, env = "TENANTGATE_LISTEN_ADDR")]
    listen_addr: Option<SocketAddr>,

    /// Admin token required to create instances
    #[arg(long, env = "TENANTGATE_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("TenantGate v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(cli.listen_addr, cli.admin_token);

    let shutdown = CancellationToken::new();
    tokio::spawn(tenantgate_rpc::cancel_on_signal(
        tokio::signal::ctrl_c(),
        shutdown.clone(),
    ));

    tenantgate_rpc::run(config, shutdown).await
}

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use tenantgate_core::{AuthorizationGateway, GatewayConfig};
use tenantgate_rpc::server::grpc_service;
use tenantgate_rpc::{GatewayClient, ERROR_CODE_METADATA_KEY};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tonic::Code;

struct TestServer {
    addr: SocketAddr,
    gateway: Arc<AuthorizationGateway>,
    shutdown: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(admin_token: Option<&str>) -> Self {
        let config = match admin_token {
            Some(token) => GatewayConfig::with_admin_token(token),
            None => GatewayConfig::default(),
        };
        let gateway = Arc::new(AuthorizationGateway::new(&config));
        let shutdown = CancellationToken::new();

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let incoming = TcpListenerStream::new(listener);

        let service = grpc_service(gateway.clone(), shutdown.clone());
        let signal = shutdown.clone();
        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(incoming, signal.cancelled_owned())
                .await
                .expect("server run");
        });

        Self {
            addr,
            gateway,
            shutdown,
            handle,
        }
    }

    async fn client(&self) -> GatewayClient {
        GatewayClient::connect(format!("http://{}", self.addr))
            .await
            .expect("connect")
    }

    async fn stop(self) {
        self.shutdown.cancel();
        self.handle.abort();
    }
}

#[tokio::test]
async fn create_without_admin_token() {
    let server = TestServer::start(None).await;
    let mut client = server.client().await;

    let (id, token) = client.create().await.expect("create");

    assert!(!id.is_empty());
    assert!(!token.is_empty());
    server.stop().await;
}

#[tokio::test]
async fn open_cluster_ignores_presented_token() {
    let server = TestServer::start(None).await;
    let mut client = server.client().await.with_admin_token("anything");

    let (id, token) = client.create().await.expect("create");

    assert!(!id.is_empty());
    assert!(!token.is_empty());
    server.stop().await;
}

#[tokio::test]
async fn create_with_admin_token_unauthorized() {
    let admin = "5f1c2ad8-8a0e-4a5f-a5f4-3f0c2f8a9c11";
    let server = TestServer::start(Some(admin)).await;

    // Nothing attached
    let err = server.client().await.create().await.expect_err("must be denied");
    assert_eq!(err.code(), Code::PermissionDenied);

    // Empty and wrong tokens surface identically
    let mut messages = HashSet::new();
    for auth in ["", "wrong"] {
        let mut client = server.client().await.with_admin_token(auth);
        let err = client.create().await.expect_err("must be denied");
        assert_eq!(err.code(), Code::PermissionDenied);
        assert_eq!(
            err.metadata().get(ERROR_CODE_METADATA_KEY).expect("error code"),
            "PERMISSION_DENIED"
        );
        messages.insert(err.message().to_string());
    }
    assert_eq!(messages.len(), 1);

    assert_eq!(server.gateway.store().record_count().await.unwrap(), 0);
    server.stop().await;
}

#[tokio::test]
async fn create_with_admin_token_authorized() {
    let admin = "5f1c2ad8-8a0e-4a5f-a5f4-3f0c2f8a9c11";
    let server = TestServer::start(Some(admin)).await;
    let mut client = server.client().await.with_admin_token(admin);

    let (id, token) = client.create().await.expect("create");

    assert!(!id.is_empty());
    assert!(!token.is_empty());
    assert_eq!(server.gateway.store().record_count().await.unwrap(), 1);
    server.stop().await;
}

#[tokio::test]
async fn instance_token_resolves_id() {
    let server = TestServer::start(None).await;
    let (id, token) = server.client().await.create().await.expect("create");

    let mut instance = server.client().await.with_instance_token(token);
    assert_eq!(instance.id().await.expect("id"), id);

    let mut stranger = server.client().await.with_instance_token("not-a-token");
    let err = stranger.id().await.expect_err("unknown token");
    assert_eq!(err.code(), Code::Unauthenticated);
    server.stop().await;
}

#[tokio::test]
async fn list_instances_requires_admin() {
    let admin = "list-admin";
    let server = TestServer::start(Some(admin)).await;
    let mut client = server.client().await.with_admin_token(admin);

    let (first, _) = client.create().await.expect("create");
    let (second, _) = client.create().await.expect("create");

    let ids: HashSet<_> = client.list_instances().await.expect("list").into_iter().collect();
    assert_eq!(ids, HashSet::from([first, second]));

    let err = server
        .client()
        .await
        .list_instances()
        .await
        .expect_err("must be denied");
    assert_eq!(err.code(), Code::PermissionDenied);
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_yield_distinct_identities() {
    let server = TestServer::start(Some("bulk")).await;
    let client = server.client().await.with_admin_token("bulk");

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let mut client = client.clone();
            tokio::spawn(async move { client.create().await })
        })
        .collect();

    let mut ids = HashSet::new();
    let mut tokens = HashSet::new();
    for handle in handles {
        let (id, token) = handle.await.expect("join").expect("create");
        ids.insert(id);
        tokens.insert(token);
    }

    assert_eq!(ids.len(), 100);
    assert_eq!(tokens.len(), 100);
    server.stop().await;
}

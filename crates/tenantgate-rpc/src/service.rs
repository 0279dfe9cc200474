//! gRPC service implementation

use crate::interceptor;
use crate::pb::tenant_gate_server::TenantGate;
use crate::pb::{
    CreateRequest, CreateResponse, IdRequest, IdResponse, ListInstancesRequest,
    ListInstancesResponse,
};
use crate::status::to_status;
use std::sync::Arc;
use tenantgate_core::{AuthorizationGateway, RequestContext};
use tonic::{Request, Response, Status};

/// TenantGate service
#[derive(Clone)]
pub struct TenantGateService {
    gateway: Arc<AuthorizationGateway>,
}

impl TenantGateService {
    /// Service over a shared gateway
    pub fn new(gateway: Arc<AuthorizationGateway>) -> Self {
        Self { gateway }
    }

    /// Shared gateway
    pub fn gateway(&self) -> &Arc<AuthorizationGateway> {
        &self.gateway
    }
}

/// Context set by `TokenInterceptor`, or read straight from metadata when
/// the service runs without it.
fn context_of<T>(request: &Request<T>) -> RequestContext {
    request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| interceptor::request_context(request.metadata()))
}

#[tonic::async_trait]
impl TenantGate for TenantGateService {
    async fn create(
        &self,
        request: Request<CreateRequest>,
    ) -> Result<Response<CreateResponse>, Status> {
        let ctx = context_of(&request);

        let created = self.gateway.create(&ctx).await.map_err(|e| to_status(&e))?;

        Ok(Response::new(CreateResponse {
            id: created.id.to_string(),
            token: created.secret.into_string(),
        }))
    }

    async fn id(&self, request: Request<IdRequest>) -> Result<Response<IdResponse>, Status> {
        let ctx = context_of(&request);

        let id = self.gateway.instance_id(&ctx).await.map_err(|e| to_status(&e))?;

        Ok(Response::new(IdResponse { id: id.to_string() }))
    }

    async fn list_instances(
        &self,
        request: Request<ListInstancesRequest>,
    ) -> Result<Response<ListInstancesResponse>, Status> {
        let ctx = context_of(&request);

        let ids = self
            .gateway
            .list_instances(&ctx)
            .await
            .map_err(|e| to_status(&e))?;

        Ok(Response::new(ListInstancesResponse {
            ids: ids.iter().map(ToString::to_string).collect(),
        }))
    }
}

//! Typed client
//!
//! Thin wrapper over the generated stub that attaches the admin and
//! instance tokens to every call.

use crate::interceptor::{ADMIN_TOKEN_METADATA_KEY, INSTANCE_TOKEN_METADATA_KEY};
use crate::pb::tenant_gate_client::TenantGateClient;
use crate::pb::{CreateRequest, IdRequest, ListInstancesRequest};
use tonic::metadata::MetadataValue;
use tonic::transport::Channel;
use tonic::{Request, Status};

/// TenantGate client
#[derive(Debug, Clone)]
pub struct GatewayClient {
    inner: TenantGateClient<Channel>,
    admin_token: Option<String>,
    instance_token: Option<String>,
}

impl GatewayClient {
    /// Connect to `http://host:port`
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, tonic::transport::Error> {
        let inner = TenantGateClient::connect(endpoint.into()).await?;
        Ok(Self::new(inner))
    }

    /// Wrap an existing stub
    pub fn new(inner: TenantGateClient<Channel>) -> Self {
        Self {
            inner,
            admin_token: None,
            instance_token: None,
        }
    }

    /// Present this admin token on every call
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Present this instance token on every call
    pub fn with_instance_token(mut self, token: impl Into<String>) -> Self {
        self.instance_token = Some(token.into());
        self
    }

    /// Create an instance, returning `(id, token)`
    pub async fn create(&mut self) -> Result<(String, String), Status> {
        let request = self.request(CreateRequest {})?;
        let resp = self.inner.create(request).await?.into_inner();
        Ok((resp.id, resp.token))
    }

    /// Instance id behind the configured instance token
    pub async fn id(&mut self) -> Result<String, Status> {
        let request = self.request(IdRequest {})?;
        Ok(self.inner.id(request).await?.into_inner().id)
    }

    /// All instance ids (admin)
    pub async fn list_instances(&mut self) -> Result<Vec<String>, Status> {
        let request = self.request(ListInstancesRequest {})?;
        Ok(self.inner.list_instances(request).await?.into_inner().ids)
    }

    fn request<T>(&self, message: T) -> Result<Request<T>, Status> {
        let mut request = Request::new(message);
        let tokens = [
            (ADMIN_TOKEN_METADATA_KEY, &self.admin_token),
            (INSTANCE_TOKEN_METADATA_KEY, &self.instance_token),
        ];
        for (key, token) in tokens {
            if let Some(token) = token {
                let value = MetadataValue::try_from(token.as_str())
                    .map_err(|_| Status::invalid_argument("token is not valid metadata"))?;
                request.metadata_mut().insert(key, value);
            }
        }
        Ok(request)
    }
}

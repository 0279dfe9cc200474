//! Gateway error → gRPC status mapping
//!
//! The only place transport status codes appear. Messages are fixed per
//! code so callers cannot tell a missing admin token from a wrong one.

use tenantgate_core::GatewayError;
use tonic::{metadata::MetadataValue, Code, Status};

/// Metadata key carrying the stable public error code
pub const ERROR_CODE_METADATA_KEY: &str = "x-tenantgate-error-code";

/// Stable public error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Admin gate refused the call
    PermissionDenied,
    /// Instance token missing or unknown
    Unauthenticated,
    /// Issuer or store failure
    Internal,
    /// Call abandoned before any write
    Cancelled,
}

impl ErrorCode {
    /// Wire form of the code
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Internal => "INTERNAL",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// gRPC code and public message for this error
    pub const fn grpc(self) -> (Code, &'static str) {
        match self {
            Self::PermissionDenied => (Code::PermissionDenied, "permission denied"),
            Self::Unauthenticated => (Code::Unauthenticated, "authentication failed"),
            Self::Internal => (Code::Internal, "internal error"),
            Self::Cancelled => (Code::Cancelled, "request cancelled"),
        }
    }
}

impl From<&GatewayError> for ErrorCode {
    fn from(e: &GatewayError) -> Self {
        match e {
            GatewayError::PermissionDenied { .. } => Self::PermissionDenied,
            GatewayError::Unauthenticated => Self::Unauthenticated,
            GatewayError::Internal(_) => Self::Internal,
            GatewayError::Cancelled => Self::Cancelled,
        }
    }
}

/// Public status for a gateway error
pub fn to_status(err: &GatewayError) -> Status {
    let code = ErrorCode::from(err);
    let (grpc_code, message) = code.grpc();

    let mut status = Status::new(grpc_code, message);
    status.metadata_mut().insert(
        ERROR_CODE_METADATA_KEY,
        MetadataValue::from_static(code.as_str()),
    );
    status
}

//! Call metadata extraction from tonic requests

use tonic::{GrpcMethod, Request, Status};

use tt_core::services::{CallContext, CallMetadata, GuardChain};

use super::status::rejection_status;

/// Metadata key carrying the bearer credential
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Full method path (`/package.Service/Method`) from the `GrpcMethod` extension
pub fn method_path<T>(request: &Request<T>) -> Option<String> {
    request
        .extensions()
        .get::<GrpcMethod>()
        .map(|method| format!("/{}/{}", method.service(), method.method()))
}

/// Owned copy of what the guard needs, so no borrow of the request is held
/// across the check
pub(crate) struct RpcCall {
    authorization: Option<String>,
    peer: Option<String>,
}

impl RpcCall {
    pub(crate) fn from_request<T>(request: &Request<T>) -> Self {
        let authorization = request
            .metadata()
            .get(AUTHORIZATION_KEY)
            .map(|value| value.to_str().unwrap_or_default().to_string());
        let peer = request.remote_addr().map(|addr| addr.ip().to_string());
        Self { authorization, peer }
    }

    pub(crate) async fn check(&self, chain: &GuardChain, method: &str) -> Result<CallContext, Status> {
        let call = CallMetadata::new(method)
            .with_authorization(self.authorization.as_deref())
            .with_peer(self.peer.as_deref());
        chain.check(call).await.map_err(|rejection| rejection_status(&rejection))
    }
}

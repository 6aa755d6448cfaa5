//! Unary RPC guard

use tonic::{Request, Status};
use tracing::error;

use tt_core::services::{Authenticated, GuardChain};

use super::metadata::{method_path, RpcCall};

/// Guard a unary call, reading the method path from the request extensions
///
/// A request without a known method path is refused as internal.
pub async fn guard_unary<T>(chain: &GuardChain, request: Request<T>) -> Result<Authenticated<T>, Status> {
    let Some(method) = method_path(&request) else {
        error!("RPC request carries no method path");
        return Err(Status::internal("Internal server error"));
    };
    guard_unary_for(chain, &method, request).await
}

/// Guard a unary call for an explicit method path
pub async fn guard_unary_for<T>(
    chain: &GuardChain,
    method: &str,
    request: Request<T>,
) -> Result<Authenticated<T>, Status> {
    let context = RpcCall::from_request(&request).check(chain, method).await?;
    Ok(Authenticated::new(context, request.into_inner()))
}

//! Request guard middleware for the HTTP transport.
//!
//! Builds the call metadata for every request (operation identifier, bearer
//! header and caller address), runs it through the [`GuardChain`] and either
//! answers with the rendered rejection or injects the resulting [`CallContext`] into the
//! request extensions for the [`AuthContext`] extractor.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    net::IpAddr,
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tt_core::errors::AuthError;
use tt_core::services::{CallContext, CallMetadata, GuardChain};

use crate::handlers::error::rejection_response;

/// Pattern used for requests that match no registered resource
const UNMATCHED_PATTERN: &str = "*";

/// Verified principal of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub principal_id: Uuid,
    pub email: String,
    /// Operation identifier the guard admitted
    pub operation: String,
}

impl AuthContext {
    /// `None` for calls admitted as public operations
    pub fn from_call_context(context: &CallContext) -> Option<Self> {
        context.principal.as_ref().map(|principal| Self {
            principal_id: principal.id,
            email: principal.email.clone(),
            operation: context.operation.clone(),
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<CallContext>()
            .and_then(AuthContext::from_call_context)
            .ok_or_else(|| {
                let rejection = AuthError::MalformedCredential {
                    reason: "no verified principal on request".to_string(),
                };
                let response = rejection_response(&rejection);
                InternalError::from_response(rejection, response).into()
            });

        ready(result)
    }
}

/// `"{METHOD} {matched pattern}"`, e.g. `GET /api/tasks/{id}`
pub fn operation_id(req: &HttpRequest) -> String {
    let pattern = req
        .match_pattern()
        .unwrap_or_else(|| UNMATCHED_PATTERN.to_string());
    format!("{} {}", req.method(), pattern)
}

/// Caller address used to key public-route counters
///
/// The socket peer, unless the peer is a trusted proxy. Behind a trusted proxy
/// the caller is the rightmost `X-Forwarded-For` hop that is not itself trusted,
/// then `X-Real-IP`. Header values that are not IP addresses are ignored.
pub fn client_address(req: &HttpRequest, trusted_proxies: &[IpAddr]) -> Option<String> {
    let peer = req.peer_addr()?.ip();
    if !trusted_proxies.contains(&peer) {
        return Some(peer.to_string());
    }

    let headers = req.headers();
    let forwarded: Vec<IpAddr> = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').filter_map(|hop| hop.trim().parse().ok()).collect())
        .unwrap_or_default();
    let hop = forwarded
        .iter()
        .rev()
        .find(|hop| !trusted_proxies.contains(*hop))
        .or_else(|| forwarded.first());
    if let Some(address) = hop {
        return Some(address.to_string());
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<IpAddr>().ok());

    Some(real_ip.unwrap_or(peer).to_string())
}

/// Guard middleware factory
#[derive(Clone)]
pub struct RequestGuard {
    chain: GuardChain,
}

impl RequestGuard {
    pub fn new(chain: GuardChain) -> Self {
        Self { chain }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGuardMiddleware {
            service: Rc::new(service),
            chain: self.chain.clone(),
        }))
    }
}

/// Guard middleware service
pub struct RequestGuardMiddleware<S> {
    service: Rc<S>,
    chain: GuardChain,
}

impl<S, B> Service<ServiceRequest> for RequestGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let chain = self.chain.clone();

        Box::pin(async move {
            let operation = operation_id(req.request());
            // A non-ASCII header is kept as an empty value so it is rejected as malformed
            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default().to_string());
            let peer = client_address(req.request(), &chain.rate_limit_config().trusted_proxies);

            let call = CallMetadata::new(&operation)
                .with_authorization(authorization.as_deref())
                .with_peer(peer.as_deref());

            match chain.check(call).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(rejection) => {
                    let response = rejection_response(&rejection);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

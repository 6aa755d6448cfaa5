//! Guard chain: classify, extract, verify, limit, enrich

use std::sync::Arc;
use tt_shared::config::RateLimitConfig;

use crate::domain::value_objects::CallerIdentity;
use crate::errors::AuthError;
use crate::services::rate_limit::RateLimiter;
use crate::services::token::TokenService;

use super::context::{CallContext, CallMetadata};
use super::public_routes::PublicRoutes;

const BEARER_SCHEME: &str = "Bearer";

/// Pull the token out of an `Authorization` value
///
/// The scheme is matched case-insensitively; the token must be a single
/// non-empty word.
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let value = authorization.ok_or_else(|| AuthError::MalformedCredential {
        reason: "missing authorization".to_string(),
    })?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AuthError::MalformedCredential {
            reason: "expected `Bearer <token>`".to_string(),
        })?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::MalformedCredential {
            reason: format!("unsupported scheme {}", scheme),
        });
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedCredential {
            reason: "empty or invalid bearer token".to_string(),
        });
    }
    Ok(token)
}

/// The single protection chain every transport adapter delegates to
#[derive(Clone)]
pub struct GuardChain {
    tokens: Arc<TokenService>,
    limiter: Arc<RateLimiter>,
    public_routes: Arc<PublicRoutes>,
}

impl GuardChain {
    pub fn new(tokens: Arc<TokenService>, limiter: Arc<RateLimiter>, public_routes: PublicRoutes) -> Self {
        Self {
            tokens,
            limiter,
            public_routes: Arc::new(public_routes),
        }
    }

    pub fn public_routes(&self) -> &PublicRoutes {
        &self.public_routes
    }

    pub fn rate_limit_config(&self) -> &RateLimitConfig {
        self.limiter.config()
    }

    /// Run the guard for one call
    ///
    /// Returns the context to forward with, or the rejection. Dropping the
    /// returned future before it resolves forwards nothing; a counter
    /// increment that already happened stays counted.
    pub async fn check(&self, call: CallMetadata<'_>) -> Result<CallContext, AuthError> {
        let result = self.run(call).await;
        match &result {
            Ok(context) => tracing::debug!(
                operation = call.operation,
                principal_id = ?context.principal_id(),
                "Request admitted"
            ),
            Err(err) => tracing::warn!(
                operation = call.operation,
                peer = call.peer,
                reason = %err,
                "Request rejected"
            ),
        }
        result
    }

    async fn run(&self, call: CallMetadata<'_>) -> Result<CallContext, AuthError> {
        let (principal, caller) = if self.public_routes.is_public(call.operation) {
            (None, CallerIdentity::from_peer(call.peer))
        } else {
            let token = extract_bearer_token(call.authorization)?;
            let claims = self.tokens.verify(token)?;
            let principal = claims.principal();
            let caller = CallerIdentity::Principal(principal.id);
            (Some(principal), caller)
        };

        self.limiter.admit(&caller, call.operation).await?;

        Ok(CallContext {
            operation: call.operation.to_string(),
            principal,
            caller,
        })
    }
}

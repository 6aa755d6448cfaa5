//! Fixed-window rate limiter

use std::sync::Arc;
use std::time::Duration;

use tt_shared::config::{RateLimitConfig, RouteLimit};

use crate::domain::value_objects::{CallerIdentity, RateKey};
use crate::errors::{RateLimitError, StoreError};

use super::store::CounterStore;

/// Successful admission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Post-increment count in the current window, 0 when limiting is off
    pub count: u64,
    pub limit: u32,
}

impl Admission {
    pub fn remaining(&self) -> u64 {
        u64::from(self.limit).saturating_sub(self.count)
    }
}

/// Fixed-window limiter over a shared counter store
///
/// Bursts straddling a window boundary can admit up to twice the limit.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Limit applied to `operation` for `caller`
    ///
    /// A per-operation override wins; otherwise principals get the protected
    /// class and addresses the public class.
    pub fn limit_for(&self, caller: &CallerIdentity, operation: &str) -> RouteLimit {
        if let Some(limit) = self.config.overrides.get(operation) {
            return *limit;
        }
        match caller {
            CallerIdentity::Principal(_) => self.config.protected,
            CallerIdentity::Address(_) => self.config.public,
        }
    }

    /// Charge one request to the caller's counter for `operation`
    ///
    /// Store failures and timeouts come back as `StoreUnavailable`; the caller
    /// must reject the request.
    pub async fn admit(
        &self,
        caller: &CallerIdentity,
        operation: &str,
    ) -> Result<Admission, RateLimitError> {
        let limit = self.limit_for(caller, operation);
        if !self.config.enabled {
            return Ok(Admission {
                count: 0,
                limit: limit.max_requests,
            });
        }

        let key = RateKey::new(&self.config.key_prefix, operation, caller);
        let count = self.increment(&key, limit.window()).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "Counter store failure, rejecting request");
            RateLimitError::from(e)
        })?;

        if count > u64::from(limit.max_requests) {
            tracing::warn!(
                key = %key,
                count,
                limit = limit.max_requests,
                "Rate limit exceeded"
            );
            return Err(RateLimitError::Exceeded {
                limit: limit.max_requests,
                window_seconds: limit.window_seconds,
            });
        }

        tracing::trace!(key = %key, count, limit = limit.max_requests, "Request admitted");
        Ok(Admission {
            count,
            limit: limit.max_requests,
        })
    }

    async fn increment(&self, key: &RateKey, window: Duration) -> Result<u64, StoreError> {
        let timeout = self.config.store_timeout();
        match tokio::time::timeout(timeout, self.store.increment_with_ttl(key.as_str(), window)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                millis: self.config.store_timeout_ms,
            }),
        }
    }
}

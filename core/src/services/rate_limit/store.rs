//! Counter store contract

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::StoreError;

/// Shared atomic counters with per-key expiry
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key` and return the new value
    ///
    /// An absent (or expired) key is created with value 1 and expiry `ttl`.
    /// The expiry of an existing key is left untouched.
    async fn increment_with_ttl(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;
}

#[async_trait]
impl<T: CounterStore + ?Sized> CounterStore for Arc<T> {
    async fn increment_with_ttl(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        (**self).increment_with_ttl(key, ttl).await
    }
}

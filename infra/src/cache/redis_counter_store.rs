//! Redis-backed counter store shared by every service instance

use async_trait::async_trait;
use std::time::Duration;

use tt_core::errors::StoreError;
use tt_core::services::rate_limit::CounterStore;

use super::redis_client::RedisClient;

/// Counter store running one atomic script per increment
#[derive(Clone)]
pub struct RedisCounterStore {
    client: RedisClient,
}

impl RedisCounterStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment_with_ttl(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        self.client
            .increment_with_ttl(key, ttl)
            .await
            .map_err(StoreError::from)
    }
}

//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `tt_core`:
//! - **Cache**: Redis client and the counter stores backing the rate limiter
//! - **Repositories**: in-memory credential and task stores

/// Cache module - Redis client and counter stores
pub mod cache;

/// Repositories module - in-memory store implementations
pub mod repositories;

use tt_core::errors::StoreError;

pub use cache::{MemoryCounterStore, RedisClient, RedisCounterStore};
pub use repositories::{MemoryCredentialStore, MemoryTaskStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Operation did not complete in time
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(e)
                if e.is_timeout()
                    || e.is_io_error()
                    || e.is_connection_dropped()
                    || e.is_connection_refusal() =>
            {
                StoreError::Unavailable {
                    message: e.to_string(),
                }
            }
            InfrastructureError::Cache(e) => StoreError::Backend {
                message: e.to_string(),
            },
            InfrastructureError::Timeout(millis) => StoreError::Timeout { millis },
            InfrastructureError::Config(message) => StoreError::Unavailable { message },
        }
    }
}

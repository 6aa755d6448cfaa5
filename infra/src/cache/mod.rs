//! Cache module
//!
//! Counter stores for the fixed-window rate limiter: a Redis-backed store
//! shared by every instance and a process-local in-memory store.

pub mod memory_counter_store;
pub mod redis_client;
pub mod redis_counter_store;

#[cfg(test)]
mod tests;

pub use memory_counter_store::MemoryCounterStore;
pub use redis_client::RedisClient;
pub use redis_counter_store::RedisCounterStore;

// Re-export commonly used types
pub use tt_shared::config::cache::CacheConfig;

//! Counter store configuration module

use serde::{Deserialize, Serialize};

use super::env::{parse_or, string_or, EnvSource};

/// Which counter store backs the rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local store, only correct for a single instance
    Memory,
    /// Redis shared by every instance
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(format!("Invalid counter store backend: {}", s)),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend selection
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Connection attempts before giving up at startup
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            connect_retries: default_connect_retries(),
        }
    }
}

impl CacheConfig {
    /// Create a new Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&super::env::process_env)
    }

    pub(crate) fn from_source(source: &EnvSource<'_>) -> Self {
        let defaults = Self::default();
        Self {
            backend: parse_or(source, "COUNTER_STORE", defaults.backend),
            url: string_or(source, "REDIS_URL", &defaults.url),
            connection_timeout: parse_or(source, "REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            connect_retries: parse_or(source, "REDIS_CONNECT_RETRIES", defaults.connect_retries),
        }
    }
}

fn default_connect_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::tests::source_from;

    #[test]
    fn test_backend_from_source() {
        let source = source_from(&[("COUNTER_STORE", "redis"), ("REDIS_URL", "redis://cache:6379/2")]);
        let config = CacheConfig::from_source(&source);
        assert_eq!(config.backend, CacheBackend::Redis);
        assert_eq!(config.url, "redis://cache:6379/2");
    }

    #[test]
    fn test_default_is_memory() {
        assert_eq!(CacheConfig::default().backend, CacheBackend::Memory);
        assert_eq!(CacheConfig::redis("redis://x").backend, CacheBackend::Redis);
    }
}

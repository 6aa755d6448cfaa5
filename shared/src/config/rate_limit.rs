//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use tracing::warn;

use super::env::{list_or, parse_or, string_or, EnvSource};

/// Limit applied to one route class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteLimit {
    /// Max requests admitted per window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl RouteLimit {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Prefix for every counter key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Upper bound on a single counter store round-trip, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Limit for authenticated operations, keyed by principal id
    pub protected: RouteLimit,

    /// Limit for public operations, keyed by network address
    pub public: RouteLimit,

    /// Per-operation overrides, keyed by operation identifier
    #[serde(default)]
    pub overrides: HashMap<String, RouteLimit>,

    /// Direct peers whose forwarding headers name the real caller
    ///
    /// Empty means forwarding headers are never honoured.
    #[serde(default)]
    pub trusted_proxies: Vec<IpAddr>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            key_prefix: default_key_prefix(),
            store_timeout_ms: default_store_timeout_ms(),
            protected: RouteLimit::new(100, 60),
            public: RouteLimit::new(20, 60),
            overrides: HashMap::new(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl RateLimitConfig {
    /// Add a custom per-operation limit
    pub fn with_override(mut self, operation: impl Into<String>, limit: RouteLimit) -> Self {
        self.overrides.insert(operation.into(), limit);
        self
    }

    /// Honour forwarding headers sent by these peers
    pub fn with_trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.trusted_proxies = proxies.into_iter().collect();
        self
    }

    pub fn is_trusted_proxy(&self, peer: &IpAddr) -> bool {
        self.trusted_proxies.contains(peer)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            protected: RouteLimit::new(1000, 60),
            public: RouteLimit::new(200, 60),
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Read from environment, starting from `base`
    pub(crate) fn from_source(base: Self, source: &EnvSource<'_>) -> Self {
        Self {
            enabled: parse_or(source, "RATE_LIMIT_ENABLED", base.enabled),
            key_prefix: string_or(source, "RATE_LIMIT_KEY_PREFIX", &base.key_prefix),
            store_timeout_ms: parse_or(source, "RATE_LIMIT_STORE_TIMEOUT_MS", base.store_timeout_ms),
            protected: RouteLimit {
                max_requests: parse_or(source, "RATE_LIMIT_MAX", base.protected.max_requests),
                window_seconds: parse_or(source, "RATE_LIMIT_WINDOW", base.protected.window_seconds),
            },
            public: RouteLimit {
                max_requests: parse_or(source, "RATE_LIMIT_PUBLIC_MAX", base.public.max_requests),
                window_seconds: parse_or(source, "RATE_LIMIT_PUBLIC_WINDOW", base.public.window_seconds),
            },
            overrides: base.overrides,
            trusted_proxies: trusted_proxies_or(source, base.trusted_proxies),
        }
    }
}

fn trusted_proxies_or(source: &EnvSource<'_>, default: Vec<IpAddr>) -> Vec<IpAddr> {
    if source("TRUSTED_PROXIES").is_none() {
        return default;
    }
    list_or(source, "TRUSTED_PROXIES", &[])
        .into_iter()
        .filter_map(|entry| match entry.parse() {
            Ok(address) => Some(address),
            Err(_) => {
                warn!(value = %entry, "Ignoring invalid TRUSTED_PROXIES entry");
                None
            }
        })
        .collect()
}

fn default_enabled() -> bool {
    true
}

fn default_key_prefix() -> String {
    String::from("rate_limit")
}

fn default_store_timeout_ms() -> u64 {
    500
}

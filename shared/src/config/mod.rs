//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing and the public-route allowlist
//! - `cache` - counter store backend
//! - `environment` - environment detection and logging configuration
//! - `rate_limit` - per route class request limits
//! - `server` - HTTP server binding

pub mod auth;
pub mod cache;
pub mod env;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, DEFAULT_PUBLIC_ROUTES};
pub use cache::{CacheBackend, CacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, RouteLimit};
pub use server::ServerConfig;

use env::EnvSource;

/// Rejected configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("JWT secret must be set explicitly in production")]
    DefaultSecretInProduction,

    #[error("token TTL must be positive, got {0}s")]
    NonPositiveTtl(i64),

    #[error("rate limit window for {class} must be positive")]
    ZeroWindow { class: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read configuration from the environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_source(&env::process_env)
    }

    pub fn from_source(source: &EnvSource<'_>) -> Self {
        let environment = Environment::from_source(source);
        let rate_limit_base = if environment.is_production() {
            RateLimitConfig::production()
        } else {
            RateLimitConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_source(source),
            auth: AuthConfig::from_source(source),
            cache: CacheConfig::from_source(source),
            rate_limit: RateLimitConfig::from_source(rate_limit_base, source),
            logging: LoggingConfig::from_source(environment, source),
        }
    }

    /// Reject settings that would silently weaken the protection layer
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;
        if jwt.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.environment.is_production() && jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecretInProduction);
        }
        if jwt.token_ttl_seconds <= 0 {
            return Err(ConfigError::NonPositiveTtl(jwt.token_ttl_seconds));
        }

        let limits = &self.rate_limit;
        let classes = [("protected", &limits.protected), ("public", &limits.public)];
        let overrides = limits.overrides.iter().map(|(op, limit)| (op.as_str(), limit));
        for (class, limit) in classes.into_iter().chain(overrides) {
            if limit.window_seconds == 0 {
                return Err(ConfigError::ZeroWindow {
                    class: class.to_string(),
                });
            }
        }
        Ok(())
    }
}

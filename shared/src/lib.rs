//! Shared configuration and response types for the TaskTrack server
//!
//! - Configuration types read from the environment
//! - Error response structure and error codes

pub mod config;
pub mod errors;

pub use config::{
    AppConfig, AuthConfig, CacheBackend, CacheConfig, ConfigError, Environment, JwtConfig,
    LogFormat, LoggingConfig, RateLimitConfig, RouteLimit, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};

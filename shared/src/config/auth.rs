//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env::{list_or, parse_or, string_or, EnvSource};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Operations reachable without a bearer token
pub const DEFAULT_PUBLIC_ROUTES: &[&str] = &[
    "POST /users/register",
    "POST /users/login",
    "GET /health",
    "/tasktrack.v1.AuthService/Register",
    "/tasktrack.v1.AuthService/Login",
    "/grpc.health.v1.Health/Check",
];

/// JWT configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC signing secret
    pub secret: String,

    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Signing algorithm (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            token_ttl_seconds: 900, // 15 minutes
            issuer: String::from("tasktrack"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_seconds = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub(crate) fn from_source(source: &EnvSource<'_>) -> Self {
        let defaults = Self::default();
        Self {
            secret: string_or(source, "JWT_SECRET", DEFAULT_SECRET),
            token_ttl_seconds: parse_or(source, "JWT_TOKEN_TTL", defaults.token_ttl_seconds),
            issuer: string_or(source, "JWT_ISSUER", &defaults.issuer),
            algorithm: string_or(source, "JWT_ALGORITHM", &defaults.algorithm).to_uppercase(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Operation identifiers that skip token verification
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            public_routes: default_public_routes(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&super::env::process_env)
    }

    pub(crate) fn from_source(source: &EnvSource<'_>) -> Self {
        Self {
            jwt: JwtConfig::from_source(source),
            public_routes: list_or(source, "PUBLIC_ROUTES", DEFAULT_PUBLIC_ROUTES),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_public_routes() -> Vec<String> {
    DEFAULT_PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect()
}

//! Configuration for the token service

use jsonwebtoken::Algorithm;
use std::str::FromStr;

use tt_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm, HMAC family only
    pub algorithm: Algorithm,
    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,
    /// Issuer claim written and required
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            algorithm: Algorithm::HS256,
            token_ttl_seconds: jwt.token_ttl_seconds,
            issuer: jwt.issuer,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Whether `algorithm` is a symmetric HMAC algorithm
pub(crate) fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Validation {
            message: format!("unknown JWT algorithm {}", config.algorithm),
        })?;
        if !is_hmac(algorithm) {
            return Err(DomainError::Validation {
                message: format!("JWT algorithm {} is not an HMAC algorithm", config.algorithm),
            });
        }

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            token_ttl_seconds: config.token_ttl_seconds,
            issuer: config.issuer.clone(),
        })
    }
}

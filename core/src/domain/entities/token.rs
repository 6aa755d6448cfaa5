//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::principal::Principal;

/// Token type advertised to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: Uuid,

    /// Principal email
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Builds claims for `principal` issued at `now` and living `ttl_seconds`
    pub fn for_principal(principal: &Principal, issuer: &str, now: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: principal.id,
            email: principal.email.clone(),
            iat: now,
            exp: now + ttl_seconds,
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn principal_id(&self) -> Uuid {
        self.sub
    }

    /// Expiry is inclusive: a token is expired at `exp` itself
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.sub, self.email.clone())
    }
}

/// Signed token handed back after login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl IssuedToken {
    /// Seconds of validity from issue time
    pub fn expires_in(&self) -> i64 {
        self.expires_at - self.issued_at
    }
}

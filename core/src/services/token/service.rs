//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

use super::config::{is_hmac, TokenServiceConfig};

/// Service for issuing and verifying signed access tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a token service reading time from the system clock
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an explicit clock
    ///
    /// # Errors
    ///
    /// Rejects an empty secret and any non-HMAC algorithm.
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !is_hmac(config.algorithm) {
            return Err(DomainError::Validation {
                message: format!("unsupported JWT algorithm {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock after decoding
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.config.token_ttl_seconds
    }

    /// Issues a token for `principal`, valid for the configured TTL
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now_unix();
        let claims = Claims::for_principal(
            principal,
            &self.config.issuer,
            now,
            self.config.token_ttl_seconds,
        );

        let access_token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed {
                reason: e.to_string(),
            })?;

        Ok(IssuedToken {
            access_token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// The header algorithm is compared with the configured one before the
    /// signature is looked at.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != self.config.algorithm {
            tracing::warn!(
                expected = ?self.config.algorithm,
                found = ?header.alg,
                "Rejected token with unexpected algorithm"
            );
            return Err(TokenError::AlgorithmMismatch {
                expected: format!("{:?}", self.config.algorithm),
                found: format!("{:?}", header.alg),
            });
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_decode_error(e.kind()))?;
        let claims = data.claims;

        if claims.is_expired_at(self.clock.now_unix()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch {
            expected: "configured".to_string(),
            found: "other".to_string(),
        },
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => TokenError::Malformed,
        ErrorKind::InvalidIssuer => TokenError::InvalidClaims {
            reason: "issuer".to_string(),
        },
        ErrorKind::MissingRequiredClaim(claim) => TokenError::InvalidClaims {
            reason: format!("missing {}", claim),
        },
        ErrorKind::Json(e) => TokenError::InvalidClaims {
            reason: e.to_string(),
        },
        other => TokenError::InvalidClaims {
            reason: format!("{:?}", other),
        },
    }
}

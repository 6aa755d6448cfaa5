//! Registration and login implementation

use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::principal::{Credential, Principal};
use crate::domain::entities::token::IssuedToken;
use crate::errors::{AccountError, DomainError};
use crate::repositories::CredentialStore;
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;

const MAX_EMAIL_LENGTH: usize = 254;

/// Principal together with the token issued for it
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub principal: Principal,
    pub token: IssuedToken,
}

/// Trim and lowercase an email, rejecting obviously invalid ones
pub fn normalize_email(email: &str) -> Result<String, AccountError> {
    let email = email.trim().to_lowercase();
    let valid = email.len() <= MAX_EMAIL_LENGTH
        && match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.contains(char::is_whitespace)
            }
            None => false,
        };

    if valid {
        Ok(email)
    } else {
        Err(AccountError::InvalidInput {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        })
    }
}

/// Account registration and login
pub struct AccountService {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    config: AccountServiceConfig,
}

impl AccountService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            credentials,
            tokens,
            config,
        }
    }

    /// Create an account and log it in
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email)?;
        self.validate_password(password)?;

        if self.credentials.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken.into());
        }

        let password_hash = self.hash_password(password).await?;
        let credential = self.credentials.create(Credential::new(email, password_hash)).await?;
        let principal = credential.principal;

        tracing::info!(principal_id = %principal.id, "Account registered");
        self.session_for(principal)
    }

    /// Check credentials and issue a token
    ///
    /// An unknown email and a wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email).map_err(|_| AccountError::InvalidCredentials)?;

        let credential = match self.credentials.find_by_email(&email).await? {
            Some(credential) => credential,
            None => {
                tracing::debug!("Login for unknown email");
                return Err(AccountError::InvalidCredentials.into());
            }
        };

        if !self.verify_password(password, &credential.password_hash).await? {
            tracing::debug!(principal_id = %credential.principal.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials.into());
        }

        tracing::info!(principal_id = %credential.principal.id, "Login succeeded");
        self.session_for(credential.principal)
    }

    fn session_for(&self, principal: Principal) -> Result<Session, DomainError> {
        let token = self.tokens.issue(&principal)?;
        Ok(Session { principal, token })
    }

    fn validate_password(&self, password: &str) -> Result<(), AccountError> {
        let length = password.len();
        if length < self.config.min_password_length || length > self.config.max_password_length {
            return Err(AccountError::InvalidInput {
                field: "password".to_string(),
                reason: format!(
                    "must be between {} and {} bytes",
                    self.config.min_password_length, self.config.max_password_length
                ),
            });
        }
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing failed: {}", e),
            })
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password verification task failed: {}", e),
            })?;

        // A corrupt stored hash reads as a mismatch
        Ok(verified.unwrap_or(false))
    }
}

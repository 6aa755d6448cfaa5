//! Credential store trait: the lookup side of registration and login.

use async_trait::async_trait;

use crate::domain::entities::principal::Credential;
use crate::errors::DomainError;

/// Repository trait for account credentials
///
/// Emails are passed already normalized (trimmed and lowercased).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a credential by email
    ///
    /// # Returns
    /// * `Ok(Some(Credential))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, DomainError>;

    /// Store a new credential
    ///
    /// Fails with `AccountError::EmailTaken` when the email is already present.
    async fn create(&self, credential: Credential) -> Result<Credential, DomainError>;
}

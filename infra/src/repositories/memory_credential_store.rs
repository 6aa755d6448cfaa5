//! In-memory credential store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tt_core::domain::entities::Credential;
use tt_core::errors::{AccountError, DomainError};
use tt_core::repositories::CredentialStore;

/// Credential store keyed by normalized email
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(email).cloned())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, DomainError> {
        let mut credentials = self.credentials.write().await;

        // Check-and-insert under one write lock
        if credentials.contains_key(&credential.principal.email) {
            return Err(AccountError::EmailTaken.into());
        }

        credentials.insert(credential.principal.email.clone(), credential.clone());
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryCredentialStore::new();
        let credential = store
            .create(Credential::new("ada@example.com", "hash"))
            .await
            .unwrap();

        let found = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.principal, credential.principal);
        assert!(store.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryCredentialStore::new();
        store.create(Credential::new("ada@example.com", "hash")).await.unwrap();

        let err = store
            .create(Credential::new("ada@example.com", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Account(AccountError::EmailTaken)));
        assert_eq!(store.len().await, 1);
    }
}

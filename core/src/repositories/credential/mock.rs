//! Mock implementation of CredentialStore for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::principal::Credential;
use crate::errors::{AccountError, DomainError};

use super::trait_::CredentialStore;

#[derive(Clone, Default)]
pub struct MockCredentialStore {
    pub credentials: Arc<Mutex<Vec<Credential>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, DomainError> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials
            .iter()
            .find(|c| c.principal.email == email)
            .cloned())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, DomainError> {
        let mut credentials = self.credentials.lock().unwrap();
        if credentials
            .iter()
            .any(|c| c.principal.email == credential.principal.email)
        {
            return Err(AccountError::EmailTaken.into());
        }
        credentials.push(credential.clone());
        Ok(credential)
    }
}

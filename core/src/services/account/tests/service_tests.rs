//! Unit tests for registration and login

use std::sync::Arc;

use crate::errors::{AccountError, DomainError};
use crate::repositories::MockCredentialStore;
use crate::services::account::{normalize_email, AccountService, AccountServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> (AccountService, Arc<TokenService>, MockCredentialStore) {
    let store = MockCredentialStore::new();
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("account-secret")).unwrap());
    let service = AccountService::new(
        Arc::new(store.clone()),
        Arc::clone(&tokens),
        AccountServiceConfig::fast(),
    );
    (service, tokens, store)
}

#[test]
fn test_normalize_email() {
    assert_eq!(normalize_email("  Ada@Example.COM ").unwrap(), "ada@example.com");
    for bad in ["", "ada", "@example.com", "ada@", "ada@example", "a@b@c.com", "ada @x.com", "ada@.com"] {
        assert!(normalize_email(bad).is_err(), "{:?}", bad);
    }
}

#[tokio::test]
async fn test_register_issues_verifiable_token() {
    let (service, tokens, store) = service();

    let session = service.register("Ada@Example.com", "correct horse").await.unwrap();

    assert_eq!(session.principal.email, "ada@example.com");
    let claims = tokens.verify(&session.token.access_token).unwrap();
    assert_eq!(claims.principal_id(), session.principal.id);

    let stored = store.credentials.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].password_hash, "correct horse");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (service, _, _) = service();
    service.register("ada@example.com", "correct horse").await.unwrap();

    let err = service.register("ADA@example.com", "another one").await.unwrap_err();
    assert!(matches!(err, DomainError::Account(AccountError::EmailTaken)));
}

#[tokio::test]
async fn test_register_validates_password_length() {
    let (service, _, _) = service();

    let err = service.register("ada@example.com", "short").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Account(AccountError::InvalidInput { ref field, .. }) if field == "password"
    ));

    let long = "x".repeat(73);
    assert!(service.register("ada@example.com", &long).await.is_err());
}

#[tokio::test]
async fn test_login_round_trip() {
    let (service, tokens, _) = service();
    let registered = service.register("ada@example.com", "correct horse").await.unwrap();

    let session = service.login(" ADA@example.com", "correct horse").await.unwrap();

    assert_eq!(session.principal, registered.principal);
    assert!(tokens.verify(&session.token.access_token).is_ok());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let (service, _, _) = service();
    service.register("ada@example.com", "correct horse").await.unwrap();

    let wrong_password = service.login("ada@example.com", "battery staple").await.unwrap_err();
    let unknown_email = service.login("bob@example.com", "correct horse").await.unwrap_err();
    let invalid_email = service.login("not-an-email", "correct horse").await.unwrap_err();

    for err in [wrong_password, unknown_email, invalid_email] {
        assert!(matches!(err, DomainError::Account(AccountError::InvalidCredentials)));
    }
}

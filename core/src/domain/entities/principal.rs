//! Principal entity: the identity a verified token speaks for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque principal identifier
    pub id: Uuid,

    /// Login email, stored lowercased
    pub email: String,
}

impl Principal {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Stored credential record as returned by the credential store
#[derive(Debug, Clone)]
pub struct Credential {
    pub principal: Principal,

    /// bcrypt hash of the account password
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential for a fresh principal
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            principal: Principal::new(Uuid::new_v4(), email),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

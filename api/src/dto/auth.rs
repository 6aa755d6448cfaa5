use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use tt_core::domain::entities::token::TOKEN_TYPE;
use tt_core::services::account::Session;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    /// Length policy is enforced by the account service
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: i64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let expires_in = session.token.expires_in();
        Self {
            user_id: session.principal.id,
            email: session.principal.email,
            access_token: session.token.access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
            expires_at: session.token.expires_at,
        }
    }
}

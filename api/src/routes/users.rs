//! Registration and login handlers

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /users/register
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "correct horse" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user_id": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "ada@example.com",
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900,
///     "expires_at": 1760000900
/// }
/// ```
///
/// ## Errors
/// - 400 for an invalid email or password
/// - 409 when the email is already registered
pub async fn register(state: web::Data<AppState>, request: web::Json<RegisterRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.accounts.register(&request.email, &request.password).await {
        Ok(session) => {
            info!(principal_id = %session.principal.id, "Account registered");
            HttpResponse::Created().json(SessionResponse::from(session))
        }
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /users/login
///
/// Same response body as registration, with 200 OK. An unknown email and a
/// wrong password both answer 401.
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.accounts.login(&request.email, &request.password).await {
        Ok(session) => HttpResponse::Ok().json(SessionResponse::from(session)),
        Err(e) => handle_domain_error(e),
    }
}

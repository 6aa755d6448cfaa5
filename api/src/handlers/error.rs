//! Error to HTTP response mapping
//!
//! Guard rejections and domain errors both render the shared
//! [`ErrorResponse`] body. Guard rejections only ever expose the generic
//! public message of their kind.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    HttpRequest, HttpResponse,
};
use tracing::{error, warn};
use validator::ValidationErrors;

use tt_core::errors::{AccountError, AuthError, DomainError, RejectionKind, TaskError, TokenError};
use tt_shared::errors::{error_codes, ErrorResponse};

/// Render a guard rejection
///
/// Unauthenticated carries `WWW-Authenticate: Bearer`, resource exhausted
/// carries `Retry-After` with the window length.
pub fn rejection_response(rejection: &AuthError) -> HttpResponse {
    let message = rejection.public_message();
    match rejection.rejection_kind() {
        RejectionKind::Unauthenticated => HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
            .json(ErrorResponse::new(error_codes::UNAUTHENTICATED, message)),
        RejectionKind::ResourceExhausted => {
            let mut body = ErrorResponse::new(error_codes::RATE_LIMIT_EXCEEDED, message);
            let mut builder = HttpResponse::TooManyRequests();
            if let Some(seconds) = rejection.retry_after_seconds() {
                builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
                body = body.add_detail("retry_after", seconds);
            }
            builder.json(body)
        }
        RejectionKind::Internal => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(error_codes::INTERNAL_ERROR, message))
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(err: DomainError) -> HttpResponse {
    match err {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))),
        DomainError::Auth(rejection) => rejection_response(&rejection),
        DomainError::Token(TokenError::SigningFailed { reason }) => {
            error!(reason = %reason, "Token signing failed");
            internal_error()
        }
        DomainError::Token(token_error) => rejection_response(&token_error.kind()),
        DomainError::Account(account_error) => handle_account_error(account_error),
        DomainError::Task(TaskError::NotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, "Task not found"))
        }
        DomainError::Task(TaskError::Invalid { reason }) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, reason))
        }
        DomainError::Store(store_error) => {
            error!(error = %store_error, "Store failure while handling request");
            internal_error()
        }
        DomainError::Internal { message } => {
            error!(message = %message, "Internal error while handling request");
            internal_error()
        }
    }
}

fn handle_account_error(err: AccountError) -> HttpResponse {
    match err {
        AccountError::EmailTaken => HttpResponse::Conflict()
            .json(ErrorResponse::new(error_codes::CONFLICT, "Email is already registered")),
        AccountError::InvalidCredentials => HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
            .json(ErrorResponse::new(error_codes::UNAUTHENTICATED, "Invalid email or password")),
        AccountError::InvalidInput { field, reason } => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::BAD_REQUEST, format!("Invalid {}", field)).add_detail(field, reason),
        ),
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error"))
}

/// Render request body validation failures, one detail per field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::BAD_REQUEST, "Request validation failed");
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        body = body.add_detail(field.to_string(), codes);
    }
    HttpResponse::BadRequest().json(body)
}

/// `JsonConfig` error handler so malformed bodies get the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected request body");
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_unauthenticated_rejection_has_challenge_header() {
        let response = rejection_response(&AuthError::ExpiredToken);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");

        let body = body_json(response).await;
        assert_eq!(body["error"], "UNAUTHENTICATED");
        assert_eq!(body["message"], "Authentication required");
    }

    #[actix_web::test]
    async fn test_invalid_and_expired_tokens_render_identically() {
        let invalid = rejection_response(&AuthError::InvalidToken {
            reason: "bad signature".to_string(),
        });
        let expired = rejection_response(&AuthError::ExpiredToken);
        assert_eq!(invalid.status(), expired.status());

        let invalid = body_json(invalid).await;
        let expired = body_json(expired).await;
        assert_eq!(invalid["error"], expired["error"]);
        assert_eq!(invalid["message"], expired["message"]);
    }

    #[actix_web::test]
    async fn test_rate_limited_rejection_has_retry_after() {
        let response = rejection_response(&AuthError::RateLimitExceeded {
            limit: 5,
            window_seconds: 60,
        });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");

        let body = body_json(response).await;
        assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(body["details"]["retry_after"], 60);
    }

    #[actix_web::test]
    async fn test_store_failure_is_internal_and_hides_cause() {
        let response = rejection_response(&AuthError::StoreUnavailable {
            message: "connection refused to redis://10.0.0.1".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("redis"));
    }

    #[test]
    fn test_domain_error_statuses() {
        let cases = [
            (DomainError::Account(AccountError::EmailTaken), StatusCode::CONFLICT),
            (DomainError::Account(AccountError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::Task(TaskError::NotFound), StatusCode::NOT_FOUND),
            (
                DomainError::Validation {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Token(TokenError::SigningFailed {
                    reason: "key".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(handle_domain_error(err).status(), status);
        }
    }
}

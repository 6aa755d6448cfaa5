//! Error types for the token service, rate limiter, counter stores, the
//! request guard and the account and task services.

use thiserror::Error;

/// Token-related errors
///
/// Every variant is kept for internal logging. Callers only ever see the
/// folded [`AuthError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token encoding")]
    Malformed,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Invalid claims: {reason}")]
    InvalidClaims { reason: String },

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {reason}")]
    SigningFailed { reason: String },
}

impl TokenError {
    /// Fold into the guard rejection taxonomy
    pub fn kind(&self) -> AuthError {
        match self {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::SigningFailed { .. } => AuthError::SigningFailure,
            other => AuthError::InvalidToken {
                reason: other.to_string(),
            },
        }
    }
}

/// Errors returned by counter stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Counter store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Counter store timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Counter store backend error: {message}")]
    Backend { message: String },
}

/// Rate limiter decision errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Rate limit exceeded: {limit} requests per {window_seconds}s")]
    Exceeded { limit: u32, window_seconds: u64 },

    #[error("Rate limit store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl From<StoreError> for RateLimitError {
    fn from(err: StoreError) -> Self {
        RateLimitError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

/// How a rejection is surfaced to the remote caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Unauthenticated,
    ResourceExhausted,
    Internal,
}

/// Request guard rejections
///
/// `InvalidToken` and `ExpiredToken` stay distinct here and in logs, but share
/// one [`public_message`](AuthError::public_message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Malformed credential: {reason}")]
    MalformedCredential { reason: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,

    #[error("Rate limit exceeded: {limit} requests per {window_seconds}s")]
    RateLimitExceeded { limit: u32, window_seconds: u64 },

    #[error("Rate limit store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Token signing failure")]
    SigningFailure,
}

impl AuthError {
    pub fn rejection_kind(&self) -> RejectionKind {
        match self {
            AuthError::MalformedCredential { .. }
            | AuthError::InvalidToken { .. }
            | AuthError::ExpiredToken => RejectionKind::Unauthenticated,
            AuthError::RateLimitExceeded { .. } => RejectionKind::ResourceExhausted,
            AuthError::StoreUnavailable { .. } | AuthError::SigningFailure => RejectionKind::Internal,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> &'static str {
        match self.rejection_kind() {
            RejectionKind::Unauthenticated => "Authentication required",
            RejectionKind::ResourceExhausted => "Too many requests",
            RejectionKind::Internal => "Internal server error",
        }
    }

    /// Window length to advertise as a retry hint
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            AuthError::RateLimitExceeded { window_seconds, .. } => Some(*window_seconds),
            _ => None,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        err.kind()
    }
}

impl From<RateLimitError> for AuthError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::Exceeded {
                limit,
                window_seconds,
            } => AuthError::RateLimitExceeded {
                limit,
                window_seconds,
            },
            RateLimitError::StoreUnavailable { message } => AuthError::StoreUnavailable { message },
        }
    }
}

/// Registration and login errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

/// Task lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task not found")]
    NotFound,

    #[error("Invalid task: {reason}")]
    Invalid { reason: String },
}

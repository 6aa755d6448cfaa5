//! HTTP middleware

pub mod guard;

pub use guard::{client_address, operation_id, AuthContext, RequestGuard};

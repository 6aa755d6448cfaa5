//! Token service module for JWT management
//!
//! Issues and verifies HMAC-signed access tokens. Verification is a pure
//! function of the token string, the configured secret and the clock.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;

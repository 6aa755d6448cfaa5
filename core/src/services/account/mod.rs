//! Account service module
//!
//! Registration and login over the credential store. Both return a freshly
//! issued access token.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{normalize_email, AccountService, Session};

//! Value objects used by the request guard.

pub mod caller;
pub mod rate_key;

pub use caller::CallerIdentity;
pub use rate_key::RateKey;

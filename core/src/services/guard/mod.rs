//! Request guard shared by every transport
//!
//! A call is classified as public or protected, the bearer token of a
//! protected call is verified, the caller is charged against the rate limiter
//! and the verified identity is handed forward as a [`CallContext`].
//! Transport adapters only translate metadata in and rejections out.

mod chain;
mod context;
mod public_routes;

#[cfg(test)]
mod tests;

pub use chain::{extract_bearer_token, GuardChain};
pub use context::{Authenticated, CallContext, CallMetadata};
pub use public_routes::PublicRoutes;

//! Fixed-window rate limiting
//!
//! The limiter charges one counter per (operation, caller) pair. The counter
//! store owns atomicity: "increment, creating with TTL if absent" is a single
//! call on [`CounterStore`].

mod limiter;
mod store;

#[cfg(test)]
pub(crate) mod tests;

pub use limiter::{Admission, RateLimiter};
pub use store::CounterStore;

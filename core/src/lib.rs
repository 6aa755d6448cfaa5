//! # TaskTrack Core
//!
//! Domain layer and request-protection services for the TaskTrack backend.
//! This crate contains domain entities, error types, repository interfaces,
//! the token service, the fixed-window rate limiter and the guard chain that
//! every transport delegates to.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::entities::{Claims, Credential, IssuedToken, NewTask, Principal, Task, TaskUpdate};
pub use domain::value_objects::{CallerIdentity, RateKey};
pub use errors::*;
pub use repositories::{CredentialStore, TaskStore};
pub use services::{
    AccountService, AccountServiceConfig, Admission, Authenticated, CallContext, CallMetadata,
    CounterStore, GuardChain, PublicRoutes, RateLimiter, TaskService, TokenService,
    TokenServiceConfig,
};

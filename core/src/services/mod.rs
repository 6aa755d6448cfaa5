//! Business services containing domain logic and use cases.

pub mod account;
pub mod guard;
pub mod rate_limit;
pub mod task;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use guard::{Authenticated, CallContext, CallMetadata, GuardChain, PublicRoutes};
pub use rate_limit::{Admission, CounterStore, RateLimiter};
pub use task::TaskService;
pub use token::{TokenService, TokenServiceConfig};

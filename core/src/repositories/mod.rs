//! Repository interfaces the core calls through. Implementations live in the
//! infrastructure crate.

pub mod credential;
pub mod task;

pub use credential::CredentialStore;
pub use task::TaskStore;

#[cfg(test)]
pub use credential::MockCredentialStore;
#[cfg(test)]
pub use task::MockTaskStore;

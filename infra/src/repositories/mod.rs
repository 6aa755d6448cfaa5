//! In-memory repository implementations
//!
//! The relational schema is out of scope; these stores keep everything in
//! process behind a `tokio::sync::RwLock`.

pub mod memory_credential_store;
pub mod memory_task_store;

pub use memory_credential_store::MemoryCredentialStore;
pub use memory_task_store::MemoryTaskStore;

//! Task store trait. Every operation is scoped by owner id.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::task::{NewTask, Task, TaskUpdate};
use crate::errors::DomainError;

/// Repository trait for task persistence
///
/// A task owned by someone else behaves exactly like a missing task.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, owner_id: Uuid, new_task: NewTask) -> Result<Task, DomainError>;

    /// All tasks of `owner_id`, oldest first
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Task>, DomainError>;

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, DomainError>;

    /// Returns `Ok(None)` when no such task belongs to `owner_id`
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, DomainError>;

    /// Returns whether a task was removed
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}

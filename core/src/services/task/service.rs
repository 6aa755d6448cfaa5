//! Task service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::task::{NewTask, Task, TaskUpdate, MAX_TITLE_LENGTH};
use crate::errors::{DomainResult, TaskError};
use crate::repositories::TaskStore;

/// Owner-scoped task operations
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner_id: Uuid, mut new_task: NewTask) -> DomainResult<Task> {
        new_task.title = validate_title(&new_task.title)?;
        let task = self.store.create(owner_id, new_task).await?;
        tracing::debug!(principal_id = %owner_id, task_id = %task.id, "Task created");
        Ok(task)
    }

    pub async fn list(&self, owner_id: Uuid) -> DomainResult<Vec<Task>> {
        self.store.list(owner_id).await
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> DomainResult<Task> {
        self.store
            .get(owner_id, id)
            .await?
            .ok_or_else(|| TaskError::NotFound.into())
    }

    pub async fn update(&self, owner_id: Uuid, id: Uuid, mut update: TaskUpdate) -> DomainResult<Task> {
        if let Some(title) = update.title.take() {
            update.title = Some(validate_title(&title)?);
        }
        self.store
            .update(owner_id, id, update)
            .await?
            .ok_or_else(|| TaskError::NotFound.into())
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> DomainResult<()> {
        if self.store.delete(owner_id, id).await? {
            tracing::debug!(principal_id = %owner_id, task_id = %id, "Task deleted");
            Ok(())
        } else {
            Err(TaskError::NotFound.into())
        }
    }
}

fn validate_title(title: &str) -> Result<String, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::Invalid {
            reason: "title must not be empty".to_string(),
        });
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(TaskError::Invalid {
            reason: format!("title must be at most {} characters", MAX_TITLE_LENGTH),
        });
    }
    Ok(title.to_string())
}

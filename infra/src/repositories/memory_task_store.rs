//! In-memory task store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tt_core::domain::entities::{NewTask, Task, TaskUpdate};
use tt_core::errors::DomainError;
use tt_core::repositories::TaskStore;

/// Task store keyed by task id, filtered by owner on every access
#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, owner_id: Uuid, new_task: NewTask) -> Result<Task, DomainError> {
        let task = Task::new(owner_id, new_task);
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, DomainError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).filter(|t| t.owner_id == owner_id).cloned())
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, DomainError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&id) {
            Some(task) if task.owner_id == owner_id => {
                task.apply(update);
                Ok(Some(task.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&id) {
            Some(task) if task.owner_id == owner_id => {
                tasks.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_tasks_are_scoped_by_owner() {
        let store = MemoryTaskStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let task = store.create(alice, new_task("Alice")).await.unwrap();
        store.create(bob, new_task("Bob")).await.unwrap();

        assert_eq!(store.list(alice).await.unwrap(), vec![task.clone()]);
        assert!(store.get(bob, task.id).await.unwrap().is_none());
        assert!(store.update(bob, task.id, TaskUpdate::default()).await.unwrap().is_none());
        assert!(!store.delete(bob, task.id).await.unwrap());
        assert!(store.get(alice, task.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryTaskStore::new();
        let owner = Uuid::new_v4();
        let task = store.create(owner, new_task("Draft")).await.unwrap();

        let updated = store
            .update(
                owner,
                task.id,
                TaskUpdate {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.completed);

        assert!(store.delete(owner, task.id).await.unwrap());
        assert!(store.list(owner).await.unwrap().is_empty());
    }
}

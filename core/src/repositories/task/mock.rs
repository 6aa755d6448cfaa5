//! Mock implementation of TaskStore for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::task::{NewTask, Task, TaskUpdate};
use crate::errors::DomainError;

use super::trait_::TaskStore;

#[derive(Clone, Default)]
pub struct MockTaskStore {
    pub tasks: Arc<Mutex<Vec<Task>>>,
}

impl MockTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MockTaskStore {
    async fn create(&self, owner_id: Uuid, new_task: NewTask) -> Result<Task, DomainError> {
        let task = Task::new(owner_id, new_task);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.iter().filter(|t| t.owner_id == owner_id).cloned().collect())
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, DomainError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .cloned())
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, DomainError> {
        let mut tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .map(|task| {
                task.apply(update);
                task.clone()
            }))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.owner_id == owner_id));
        Ok(tasks.len() != before)
    }
}

pub mod auth;
pub mod task;

pub use auth::{LoginRequest, RegisterRequest, SessionResponse};
pub use task::{CreateTaskRequest, TaskListResponse, TaskResponse, UpdateTaskRequest};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

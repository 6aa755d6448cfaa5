//! Task handlers
//!
//! Every handler takes [`AuthContext`]: the guard has already verified the
//! caller, so the owner id always comes from the verified principal.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateTaskRequest, TaskListResponse, TaskResponse, UpdateTaskRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for GET /api/tasks
pub async fn list_tasks(auth: AuthContext, state: web::Data<AppState>) -> HttpResponse {
    match state.tasks.list(auth.principal_id).await {
        Ok(tasks) => HttpResponse::Ok().json(TaskListResponse::from(tasks)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for POST /api/tasks
///
/// ```json
/// { "title": "Write report", "description": "Q3 numbers" }
/// ```
pub async fn create_task(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CreateTaskRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.tasks.create(auth.principal_id, request.into_inner().into()).await {
        Ok(task) => HttpResponse::Created().json(TaskResponse::from(task)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for GET /api/tasks/{id}
pub async fn get_task(auth: AuthContext, state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.tasks.get(auth.principal_id, path.into_inner()).await {
        Ok(task) => HttpResponse::Ok().json(TaskResponse::from(task)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for PUT /api/tasks/{id}
pub async fn update_task(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTaskRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let update = request.into_inner().into();
    match state.tasks.update(auth.principal_id, path.into_inner(), update).await {
        Ok(task) => HttpResponse::Ok().json(TaskResponse::from(task)),
        Err(e) => handle_domain_error(e),
    }
}

/// Handler for DELETE /api/tasks/{id}
pub async fn delete_task(auth: AuthContext, state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.tasks.delete(auth.principal_id, path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => handle_domain_error(e),
    }
}

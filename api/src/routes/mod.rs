//! Route handlers
//!
//! - `health` - liveness probe
//! - `users` - registration and login (public)
//! - `tasks` - owner-scoped task CRUD (protected)

pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use tt_core::services::{AccountService, TaskService};

/// Application state that holds shared services
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub tasks: Arc<TaskService>,
}

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("/register", web::post().to(users::register))
                .route("/login", web::post().to(users::login)),
        )
        .service(
            web::scope("/api/tasks")
                .route("", web::get().to(tasks::list_tasks))
                .route("", web::post().to(tasks::create_task))
                .route("/{id}", web::get().to(tasks::get_task))
                .route("/{id}", web::put().to(tasks::update_task))
                .route("/{id}", web::delete().to(tasks::delete_task)),
        );
}

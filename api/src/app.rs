//! Application factory
//!
//! Wires the route table behind the request guard and the per-request
//! tracing span.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use tt_core::services::GuardChain;

use crate::handlers::error::json_error_handler;
use crate::middleware::RequestGuard;
use crate::routes::{self, AppState};

/// Create and configure the application with all dependencies
///
/// Middleware order: the tracing span wraps the guard, so rejected requests
/// are logged as well.
pub fn create_app(
    state: web::Data<AppState>,
    guard: GuardChain,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(routes::configure)
        .wrap(RequestGuard::new(guard))
        .wrap(TracingLogger::default())
}

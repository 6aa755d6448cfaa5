//! # TaskTrack API
//!
//! HTTP routes behind the request guard middleware, plus tonic adapters that
//! run the same guard chain for unary and streaming RPC calls.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod rpc;
pub mod telemetry;

pub use app::create_app;
pub use bootstrap::{build_services, Services, StartupError};
pub use middleware::{AuthContext, RequestGuard};
pub use routes::AppState;

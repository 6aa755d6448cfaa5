use actix_web::HttpServer;
use anyhow::Context;
use tracing::info;

use tt_api::{build_services, create_app, telemetry, Services};
use tt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Loads `.env` first
    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging).context("failed to initialise tracing")?;

    info!(environment = %config.environment, "Starting TaskTrack API server");

    let Services { state, guard } = build_services(&config)
        .await
        .context("failed to build services")?;

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), guard.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    Ok(())
}

//! Service wiring from [`AppConfig`]

use actix_web::web;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use tt_core::errors::DomainError;
use tt_core::services::{
    AccountService, AccountServiceConfig, CounterStore, GuardChain, PublicRoutes, RateLimiter, TaskService,
    TokenService, TokenServiceConfig,
};
use tt_infra::{InfrastructureError, MemoryCounterStore, MemoryCredentialStore, MemoryTaskStore, RedisClient, RedisCounterStore};
use tt_shared::config::{AppConfig, CacheBackend, CacheConfig, ConfigError};

use crate::routes::AppState;

/// Failures that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid token settings: {0}")]
    Token(#[from] DomainError),

    #[error("counter store unavailable: {0}")]
    CounterStore(#[from] InfrastructureError),
}

/// Everything one HTTP worker needs
#[derive(Clone)]
pub struct Services {
    pub state: web::Data<AppState>,
    pub guard: GuardChain,
}

/// Build the services described by `config`
pub async fn build_services(config: &AppConfig) -> Result<Services, StartupError> {
    config.validate()?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::try_from(&config.auth.jwt)?)?);
    let counters = counter_store(&config.cache).await?;
    let limiter = Arc::new(RateLimiter::new(counters, config.rate_limit.clone()));
    let public_routes = PublicRoutes::new(config.auth.public_routes.iter().cloned());
    info!(
        public_routes = public_routes.len(),
        rate_limit_enabled = config.rate_limit.enabled,
        "Request guard configured"
    );
    let guard = GuardChain::new(Arc::clone(&tokens), limiter, public_routes);

    let accounts = Arc::new(AccountService::new(
        Arc::new(MemoryCredentialStore::new()),
        tokens,
        AccountServiceConfig::default(),
    ));
    let tasks = Arc::new(TaskService::new(Arc::new(MemoryTaskStore::new())));

    Ok(Services {
        state: web::Data::new(AppState { accounts, tasks }),
        guard,
    })
}

/// Select the counter store backend
pub async fn counter_store(config: &CacheConfig) -> Result<Arc<dyn CounterStore>, StartupError> {
    match config.backend {
        CacheBackend::Memory => {
            warn!("Using in-memory rate limit counters, limits are per instance");
            Ok(Arc::new(MemoryCounterStore::new()))
        }
        CacheBackend::Redis => {
            let client = RedisClient::new(config).await?;
            info!("Using Redis rate limit counters");
            Ok(Arc::new(RedisCounterStore::new(client)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_services_with_defaults() {
        let services = build_services(&AppConfig::default()).await.unwrap();
        assert!(services.guard.public_routes().is_public("GET /health"));
    }

    #[tokio::test]
    async fn test_build_services_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.auth.jwt.secret = String::new();
        assert!(matches!(
            build_services(&config).await,
            Err(StartupError::Config(ConfigError::EmptySecret))
        ));

        let mut config = AppConfig::default();
        config.auth.jwt.algorithm = "RS256".to_string();
        assert!(matches!(build_services(&config).await, Err(StartupError::Token(_))));
    }
}

//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use tt_api::AppState;
use tt_core::errors::StoreError;
use tt_core::services::{
    AccountService, AccountServiceConfig, CounterStore, GuardChain, PublicRoutes, RateLimiter, TaskService,
    TokenService, TokenServiceConfig,
};
use tt_core::{ManualClock, Principal};
use tt_infra::{MemoryCounterStore, MemoryCredentialStore, MemoryTaskStore};
use tt_shared::config::{RateLimitConfig, RouteLimit, DEFAULT_PUBLIC_ROUTES};

pub const START: i64 = 1_700_000_000;
pub const TOKEN_TTL: i64 = 300;

/// Counter store whose backend is always down
pub struct UnavailableCounterStore;

#[async_trait]
impl CounterStore for UnavailableCounterStore {
    async fn increment_with_ttl(&self, _key: &str, _ttl: Duration) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable {
            message: "connection refused".to_string(),
        })
    }
}

pub struct TestHarness {
    pub state: web::Data<AppState>,
    pub guard: GuardChain,
    pub tokens: Arc<TokenService>,
    pub clock: ManualClock,
}

impl TestHarness {
    pub fn new(protected_max: u32, public_max: u32) -> Self {
        Self::with_store(Arc::new(MemoryCounterStore::new()), protected_max, public_max)
    }

    pub fn with_store(counters: Arc<dyn CounterStore>, protected_max: u32, public_max: u32) -> Self {
        let limits = RateLimitConfig {
            protected: RouteLimit::new(protected_max, 60),
            public: RouteLimit::new(public_max, 60),
            ..Default::default()
        };
        Self::with_limits(counters, limits)
    }

    pub fn with_limits(counters: Arc<dyn CounterStore>, limits: RateLimitConfig) -> Self {
        let clock = ManualClock::at_unix(START);
        let tokens = Arc::new(
            TokenService::with_clock(
                TokenServiceConfig::new("api-test-secret").with_ttl_seconds(TOKEN_TTL),
                Arc::new(clock.clone()),
            )
            .unwrap(),
        );
        let limiter = Arc::new(RateLimiter::new(counters, limits));
        let guard = GuardChain::new(
            Arc::clone(&tokens),
            limiter,
            PublicRoutes::new(DEFAULT_PUBLIC_ROUTES.iter().copied()),
        );

        let accounts = Arc::new(AccountService::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::clone(&tokens),
            AccountServiceConfig::fast(),
        ));
        let tasks = Arc::new(TaskService::new(Arc::new(MemoryTaskStore::new())));

        Self {
            state: web::Data::new(AppState { accounts, tasks }),
            guard,
            tokens,
            clock,
        }
    }

    pub fn bearer_for(&self, principal: &Principal) -> String {
        format!("Bearer {}", self.tokens.issue(principal).unwrap().access_token)
    }

    pub fn bearer(&self) -> (Principal, String) {
        let principal = Principal::new(Uuid::new_v4(), "ada@example.com");
        let bearer = self.bearer_for(&principal);
        (principal, bearer)
    }
}

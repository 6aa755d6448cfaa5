//! Rate limiter against the in-memory counter store

use std::sync::Arc;

use tt_core::clock::ManualClock;
use tt_core::domain::value_objects::CallerIdentity;
use tt_core::errors::RateLimitError;
use tt_core::services::rate_limit::RateLimiter;
use tt_infra::MemoryCounterStore;
use tt_shared::config::{RateLimitConfig, RouteLimit};
use uuid::Uuid;

fn limiter(max: u32, window_seconds: u64) -> (Arc<RateLimiter>, ManualClock) {
    let clock = ManualClock::at_unix(1_700_000_000);
    let store = Arc::new(MemoryCounterStore::with_clock(Arc::new(clock.clone())));
    let config = RateLimitConfig {
        protected: RouteLimit::new(max, window_seconds),
        public: RouteLimit::new(max, window_seconds),
        ..Default::default()
    };
    (Arc::new(RateLimiter::new(store, config)), clock)
}

async fn run_concurrent(n: usize, max: u32) -> usize {
    let (limiter, _) = limiter(max, 60);
    let caller = CallerIdentity::Principal(Uuid::new_v4());

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            let caller = caller.clone();
            tokio::spawn(async move { limiter.admit(&caller, "POST /api/tasks").await })
        })
        .collect();

    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => {}
            Err(RateLimitError::Exceeded { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }
    rejected
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_admits_reject_exactly_n_minus_m() {
    for (n, m) in [(100usize, 10u32), (10, 10), (5, 10), (64, 1), (32, 0)] {
        let rejected = run_concurrent(n, m).await;
        assert_eq!(rejected, n.saturating_sub(m as usize), "n={} m={}", n, m);
    }
}

#[tokio::test]
async fn test_fresh_window_after_duration_elapses() {
    let (limiter, clock) = limiter(2, 10);
    let caller = CallerIdentity::Address("203.0.113.7".into());

    limiter.admit(&caller, "POST /users/login").await.unwrap();
    limiter.admit(&caller, "POST /users/login").await.unwrap();
    assert!(limiter.admit(&caller, "POST /users/login").await.is_err());

    clock.advance_secs(10);

    let admission = limiter.admit(&caller, "POST /users/login").await.unwrap();
    assert_eq!(admission.count, 1);
}

#[tokio::test]
async fn test_boundary_burst_admits_up_to_twice_the_limit() {
    let (limiter, clock) = limiter(3, 10);
    let caller = CallerIdentity::Principal(Uuid::new_v4());
    let mut admitted = 0;

    clock.advance_secs(9);
    for _ in 0..3 {
        admitted += limiter.admit(&caller, "GET /api/tasks").await.is_ok() as usize;
    }
    clock.advance_secs(10);
    for _ in 0..3 {
        admitted += limiter.admit(&caller, "GET /api/tasks").await.is_ok() as usize;
    }

    assert_eq!(admitted, 6);
}

//! Process-local counter store
//!
//! Correct for a single instance only: counters are not shared across
//! processes. Expired counters are replaced on the next increment and swept
//! once the map grows past a threshold.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tt_core::clock::{Clock, SystemClock};
use tt_core::errors::StoreError;
use tt_core::services::rate_limit::CounterStore;

const DEFAULT_SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Counter {
    count: u64,
    expires_at: DateTime<Utc>,
}

/// In-memory counter store with clock-driven expiry
#[derive(Debug)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<String, Counter>>,
    clock: Arc<dyn Clock>,
    sweep_threshold: usize,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            clock,
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }

    /// Number of counters held, live or not yet swept
    pub fn len(&self) -> usize {
        self.counters.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired counter
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        match self.counters.lock() {
            Ok(mut counters) => {
                let before = counters.len();
                counters.retain(|_, counter| counter.expires_at > now);
                before - counters.len()
            }
            Err(_) => 0,
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment_with_ttl(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| StoreError::Backend {
            message: format!("invalid ttl: {}", e),
        })?;
        let now = self.clock.now();

        let mut counters = self.counters.lock().map_err(|_| StoreError::Backend {
            message: "counter map poisoned".to_string(),
        })?;

        if counters.len() >= self.sweep_threshold {
            counters.retain(|_, counter| counter.expires_at > now);
        }

        let counter = counters
            .entry(key.to_string())
            .and_modify(|counter| {
                if counter.expires_at <= now {
                    *counter = Counter {
                        count: 0,
                        expires_at: now + ttl,
                    };
                }
            })
            .or_insert(Counter {
                count: 0,
                expires_at: now + ttl,
            });
        counter.count += 1;
        Ok(counter.count)
    }
}

//! Fixed-window rate limiter
//!
//! Each key gets a window of `window_ms` starting at its first request. Up to
//! `max_requests` requests are admitted inside the window; later requests are
//! refused until the window expires, at which point the next request opens a
//! fresh window. Bursts straddling a window boundary can reach twice the
//! nominal rate.

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use crate::store::{InMemoryStore, RateLimitStore, RateLimitWindow};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Default number of tracked keys before expired windows are purged
pub const DEFAULT_MAX_TRACKED_KEYS: usize = 10_000;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,

    /// How long the caller should wait before retrying (0 when allowed)
    pub retry_after_ms: u64,
}

impl RateLimitDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_ms: 0,
        }
    }

    fn deny(retry_after_ms: u64) -> Self {
        Self {
            allowed: false,
            retry_after_ms,
        }
    }

    /// Retry delay rounded up to whole seconds (for `Retry-After`)
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after_ms.div_ceil(1_000)
    }
}

/// Per-key fixed-window request counter
///
/// Shared across concurrent requests; the read-check-write sequence for a
/// key runs under one lock.
pub struct RateLimiter {
    store: Mutex<Box<dyn RateLimitStore>>,
    clock: Arc<dyn Clock>,
    max_tracked_keys: usize,
}

impl RateLimiter {
    /// Create a limiter over the given store and clock
    pub fn new(store: impl RateLimitStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
            clock: Arc::new(clock),
            max_tracked_keys: DEFAULT_MAX_TRACKED_KEYS,
        }
    }

    /// Create a limiter with an in-memory store and the system clock
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new(), SystemClock)
    }

    /// Set how many keys may be tracked before expired windows are purged
    pub fn with_max_tracked_keys(mut self, max_tracked_keys: usize) -> Self {
        self.max_tracked_keys = max_tracked_keys;
        self
    }

    /// Count a request for `key` against `config`
    ///
    /// Never fails; a refused request is not counted.
    pub fn check(&self, key: &str, config: &RateLimitConfig) -> RateLimitDecision {
        let now = self.clock.now_ms();
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);

        if store.len() > self.max_tracked_keys {
            let purged = store.remove_expired(now);
            debug!("Purged {} expired rate-limit windows", purged);
        }

        match store.get(key) {
            Some(window) if window.reset_at_ms > now => {
                if window.count >= config.max_requests {
                    debug!("Rate limit reached for key '{}'", key);
                    return RateLimitDecision::deny(window.reset_at_ms.saturating_sub(now));
                }
                store.put(
                    key,
                    RateLimitWindow {
                        count: window.count + 1,
                        reset_at_ms: window.reset_at_ms,
                    },
                );
                RateLimitDecision::allow()
            }
            _ => {
                store.put(
                    key,
                    RateLimitWindow {
                        count: 1,
                        reset_at_ms: now.saturating_add(config.window_ms),
                    },
                );
                RateLimitDecision::allow()
            }
        }
    }

    /// Drop expired windows now, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_expired(now)
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::in_memory()
    }
}

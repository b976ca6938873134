//! Window storage for the rate limiter

use std::collections::HashMap;

/// Fixed-window counter for one client key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitWindow {
    /// Requests admitted in the current window
    pub count: u32,

    /// When the window expires (ms since epoch)
    pub reset_at_ms: u64,
}

/// Key-value store of rate-limit windows
///
/// The limiter serializes access, so implementations need no locking of
/// their own.
pub trait RateLimitStore: Send {
    /// Fetch the window for a key
    fn get(&self, key: &str) -> Option<RateLimitWindow>;

    /// Insert or replace the window for a key
    fn put(&mut self, key: &str, window: RateLimitWindow);

    /// Drop every window that expired at or before `now_ms`, returning how many
    fn remove_expired(&mut self, now_ms: u64) -> usize;

    /// Number of tracked keys
    fn len(&self) -> usize;

    /// Whether no key is tracked
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryStore {
    windows: HashMap<String, RateLimitWindow>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<RateLimitWindow> {
        self.windows.get(key).copied()
    }

    fn put(&mut self, key: &str, window: RateLimitWindow) {
        self.windows.insert(key.to_string(), window);
    }

    fn remove_expired(&mut self, now_ms: u64) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, window| window.reset_at_ms > now_ms);
        before - self.windows.len()
    }

    fn len(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut store = InMemoryStore::new();
        assert!(store.get("a").is_none());

        let window = RateLimitWindow { count: 1, reset_at_ms: 100 };
        store.put("a", window);
        assert_eq!(store.get("a"), Some(window));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_expired_keeps_live_windows() {
        let mut store = InMemoryStore::new();
        store.put("old", RateLimitWindow { count: 3, reset_at_ms: 100 });
        store.put("edge", RateLimitWindow { count: 3, reset_at_ms: 200 });
        store.put("live", RateLimitWindow { count: 1, reset_at_ms: 300 });

        assert_eq!(store.remove_expired(200), 2);
        assert!(store.get("live").is_some());
        assert!(store.get("edge").is_none());
        assert!(!store.is_empty());
    }
}

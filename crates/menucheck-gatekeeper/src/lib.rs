//! Menucheck Gatekeeper
//!
//! Guards the extraction endpoints against abuse with a per-client,
//! fixed-window request budget.
//!
//! The Gatekeeper provides:
//! - A fixed-window rate limiter keyed by client identity
//! - An injectable window store (in-memory by default)
//! - An injectable clock, so tests can move time explicitly
//! - Per-endpoint budget presets
//!
//! # Examples
//!
//! ```
//! use menucheck_gatekeeper::{RateLimitConfig, RateLimiter};
//!
//! let limiter = RateLimiter::in_memory();
//! let config = RateLimitConfig::new(2, 60_000);
//!
//! assert!(limiter.check("client", &config).allowed);
//! assert!(limiter.check("client", &config).allowed);
//! assert!(!limiter.check("client", &config).allowed);
//! ```

#![warn(missing_docs)]

mod clock;
mod config;
mod limiter;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RateLimitConfig;
pub use limiter::{RateLimitDecision, RateLimiter, DEFAULT_MAX_TRACKED_KEYS};
pub use store::{InMemoryStore, RateLimitStore, RateLimitWindow};

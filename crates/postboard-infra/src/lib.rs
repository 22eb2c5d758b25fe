//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Post stores only
//! - `rate-limit` - Per-client rate limiting via governor

pub mod store;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use store::{InMemoryPostStore, JsonFilePostStore};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

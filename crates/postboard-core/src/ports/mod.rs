//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod store;

pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use store::{PostStore, next_post_id};

//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record a request for `key` and report whether it is allowed.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;

    /// Requests allowed per window, for the `X-RateLimit-Limit` header.
    fn limit(&self) -> u32;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid rate limit configuration: {0}")]
    InvalidConfig(String),
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostService;
use postboard_core::ports::{PostStore, RateLimiter};
use postboard_infra::{InMemoryPostStore, JsonFilePostStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with the configured post store.
    pub fn new(config: &AppConfig) -> Self {
        let store: Arc<dyn PostStore> = match &config.posts_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using JSON file post store");
                Arc::new(JsonFilePostStore::new(path))
            }
            None if config.seed_sample_posts => {
                tracing::info!("POSTS_FILE not set. Using in-memory store with sample posts.");
                Arc::new(InMemoryPostStore::sample())
            }
            None => {
                tracing::info!("POSTS_FILE not set. Using empty in-memory store.");
                Arc::new(InMemoryPostStore::new())
            }
        };

        Self::from_store(store)
    }

    pub fn from_store(store: Arc<dyn PostStore>) -> Self {
        Self {
            posts: PostService::new(store),
        }
    }
}

/// Build the per-client rate limiter, if enabled and compiled in.
#[cfg(feature = "rate-limit")]
pub fn build_rate_limiter(config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
    use postboard_infra::{InMemoryRateLimiter, RateLimitConfig};

    if !config.rate_limit_enabled {
        tracing::info!("Rate limiting disabled");
        return None;
    }

    let limits = RateLimitConfig::from_env();
    match InMemoryRateLimiter::new(limits.clone()) {
        Ok(limiter) => {
            tracing::info!(
                max_requests = limits.max_requests,
                window_secs = limits.window.as_secs(),
                "Rate limiting enabled"
            );
            Some(Arc::new(limiter))
        }
        Err(e) => {
            tracing::error!("Invalid rate limit configuration: {}. Rate limiting disabled.", e);
            None
        }
    }
}

#[cfg(not(feature = "rate-limit"))]
pub fn build_rate_limiter(_config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
    tracing::info!("Running without rate-limit feature");
    None
}

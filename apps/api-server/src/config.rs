//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// JSON file backing the post store. `None` keeps posts in memory.
    pub posts_file: Option<PathBuf>,
    /// Seed the in-memory store with two sample posts.
    pub seed_sample_posts: bool,
    pub rate_limit_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5002),
            posts_file: env::var("POSTS_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            seed_sample_posts: env_flag("SEED_SAMPLE_POSTS", true),
            rate_limit_enabled: env_flag("RATE_LIMIT_ENABLED", true),
        }
    }
}

/// Boolean env var; anything other than `false`/`0`/`no`/`off` counts as on.
pub fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

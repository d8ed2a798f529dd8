//! Rate limiting port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Rate limiter trait - abstraction over rate limiting backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count a request against `key` and report whether it may proceed.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// When the current window ends.
    pub reset_time: DateTime<Utc>,
}

impl RateLimitResult {
    /// Time left until the window resets, zero if already past.
    pub fn reset_after(&self, now: DateTime<Utc>) -> Duration {
        (self.reset_time - now).to_std().unwrap_or_default()
    }
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}

//! In-memory fixed-window rate limiter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use postcraft_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_time: DateTime<Utc>,
}

/// Per-key fixed-window counter.
///
/// Each key's window is updated under its map-shard lock, so concurrent
/// checks for one key never lose increments.
/// Note: Limits are per-process and keys are never evicted.
pub struct InMemoryRateLimiter {
    windows: DashMap<String, Window>,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    /// Count a request for `key` as if it arrived at `now`.
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateLimitResult {
        let max = self.config.max_requests;
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_time: now,
        });
        let window = entry.value_mut();

        if window.count == 0 || now >= window.reset_time {
            let window_len = chrono::Duration::from_std(self.config.window)
                .unwrap_or_else(|_| chrono::Duration::days(365));
            *window = Window {
                count: 1,
                reset_time: now + window_len,
            };
            return RateLimitResult {
                allowed: true,
                remaining: max.saturating_sub(1),
                reset_time: window.reset_time,
            };
        }

        if window.count >= max {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_time: window.reset_time,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: max - window.count,
            reset_time: window.reset_time,
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_at(key, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn limiter(max_requests: u32, window_ms: u64) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_millis(window_ms),
        })
    }

    #[test]
    fn test_fixed_window_allows_then_blocks_then_resets() {
        let limiter = limiter(2, 1000);
        let start = Utc::now();

        let first = limiter.check_at("client", start);
        let second = limiter.check_at("client", start + chrono::Duration::milliseconds(100));
        let third = limiter.check_at("client", start + chrono::Duration::milliseconds(200));

        assert_eq!(
            [first.allowed, second.allowed, third.allowed],
            [true, true, false]
        );
        assert_eq!(first.remaining, 1);
        assert_eq!(second.remaining, 0);
        assert_eq!(third.remaining, 0);
        assert_eq!(third.reset_time, first.reset_time);

        let later = start + chrono::Duration::milliseconds(1000);
        let fourth = limiter.check_at("client", later);
        assert!(fourth.allowed);
        assert_eq!(fourth.remaining, 1);
        assert_eq!(fourth.reset_time, later + chrono::Duration::milliseconds(1000));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = limiter(1, 60_000);
        let now = Utc::now();

        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn test_blocked_requests_do_not_extend_window() {
        let limiter = limiter(1, 1000);
        let start = Utc::now();

        let first = limiter.check_at("k", start);
        for ms in [100, 500, 999] {
            let res = limiter.check_at("k", start + chrono::Duration::milliseconds(ms));
            assert!(!res.allowed);
            assert_eq!(res.reset_time, first.reset_time);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_checks_do_not_lose_increments() {
        let limiter = Arc::new(limiter(200, 60_000));

        let handles: Vec<_> = (0..1000)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check("burst").await.unwrap().allowed })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 200);
    }

    #[tokio::test]
    async fn test_check_uses_wall_clock() {
        let limiter = limiter(2, 60_000);
        let res = limiter.check("ip").await.unwrap();
        assert!(res.allowed);
        assert!(res.reset_time > Utc::now());
        assert!(res.reset_after(Utc::now()) <= Duration::from_secs(60));
    }
}

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use postcraft_core::generation::DEFAULT_STAGE_TIMEOUT;
use postcraft_core::profile::DEFAULT_STEP_DELAY;
use postcraft_infra::{ProviderSettings, RateLimitConfig};

pub const DEFAULT_SERVICE_NAME: &str = "Postcraft Post Generator API";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Upper bound on each model call inside the pipeline.
    pub stage_timeout: Duration,
    /// Delay between posts reported by the profile tone demo.
    pub profile_step_delay: Duration,
    pub rate_limit: RateLimitConfig,
    /// Key rate limits on forwarded client addresses. Enable only behind a
    /// proxy that sets `X-Forwarded-For`.
    pub trust_forwarded_for: bool,
    pub providers: ProviderSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            stage_timeout: env::var("STAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_STAGE_TIMEOUT),
            profile_step_delay: env::var("PROFILE_STEP_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_STEP_DELAY),
            rate_limit: RateLimitConfig::from_env(),
            trust_forwarded_for: env::var("TRUST_FORWARDED_FOR")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            providers: ProviderSettings::from_env(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("YES"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("0"));
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use postcraft_core::PostGenerator;
use postcraft_core::domain::ProviderKind;
use postcraft_core::ports::{ProviderError, ProviderFactory, RateLimiter};
use postcraft_core::profile::ProfileToneExtractor;
use postcraft_infra::{HttpProviderFactory, InMemoryRateLimiter};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<dyn ProviderFactory>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub trust_forwarded_for: bool,
    pub profile_extractor: ProfileToneExtractor,
    pub stage_timeout: Duration,
    pub service_name: String,
}

impl AppState {
    /// Build the application state from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ProviderError> {
        let providers = HttpProviderFactory::new(config.providers.clone())?;
        let rate_limiter = InMemoryRateLimiter::new(config.rate_limit.clone());

        tracing::info!(
            max_requests = config.rate_limit.max_requests,
            window_secs = config.rate_limit.window.as_secs(),
            trust_forwarded_for = config.trust_forwarded_for,
            stage_timeout_secs = config.stage_timeout.as_secs(),
            "Application state initialized"
        );

        Ok(Self {
            providers: Arc::new(providers),
            rate_limiter: Arc::new(rate_limiter),
            trust_forwarded_for: config.trust_forwarded_for,
            profile_extractor: ProfileToneExtractor::new(config.profile_step_delay),
            stage_timeout: config.stage_timeout,
            service_name: config.service_name.clone(),
        })
    }

    /// Pipeline bound to the provider selected for this request.
    pub fn generator(&self, kind: ProviderKind) -> Result<PostGenerator, ProviderError> {
        let provider = self.providers.create(kind)?;
        Ok(PostGenerator::new(provider).with_stage_timeout(self.stage_timeout))
    }
}

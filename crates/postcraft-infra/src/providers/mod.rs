//! Text-generation providers and the factory that selects one per request.

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;
#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use postcraft_core::domain::ProviderKind;
use postcraft_core::ports::{ProviderError, ProviderFactory, TextGenerator};

/// Connection settings for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// `None` when the key is not configured.
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub model: String,
}

impl ProviderConfig {
    /// Read `<PREFIX>_API_KEY`, `<PREFIX>_API_BASE` and `<PREFIX>_MODEL`.
    fn from_env(prefix: &str, default_base: &str, default_model: &str) -> Self {
        let var = |name: &str| {
            std::env::var(format!("{}_{}", prefix, name))
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        Self {
            api_key: var("API_KEY").map(SecretString::from),
            api_base: var("API_BASE").unwrap_or_else(|| default_base.to_string()),
            model: var("MODEL").unwrap_or_else(|| default_model.to_string()),
        }
    }
}

/// Settings for every supported provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
    /// Transport-level timeout for a single HTTP request.
    pub request_timeout: Duration,
}

impl ProviderSettings {
    pub const GEMINI_API_BASE: &'static str = "https://generativelanguage.googleapis.com";
    pub const GEMINI_MODEL: &'static str = "gemini-2.5-flash-lite";
    pub const OPENAI_API_BASE: &'static str = "https://api.openai.com/v1";
    pub const OPENAI_MODEL: &'static str = "gpt-4.1-nano";

    pub fn from_env() -> Self {
        Self {
            gemini: ProviderConfig::from_env("GEMINI", Self::GEMINI_API_BASE, Self::GEMINI_MODEL),
            openai: ProviderConfig::from_env("OPENAI", Self::OPENAI_API_BASE, Self::OPENAI_MODEL),
            request_timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }

    fn config(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        }
    }

    /// Whether an API key is present for `kind`.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.config(kind).api_key.is_some()
    }
}

/// Builds HTTP-backed providers sharing one connection pool.
pub struct HttpProviderFactory {
    settings: ProviderSettings,
    #[cfg(any(feature = "gemini", feature = "openai"))]
    client: reqwest::Client,
}

impl HttpProviderFactory {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        #[cfg(any(feature = "gemini", feature = "openai"))]
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        for kind in [ProviderKind::Gemini, ProviderKind::OpenAi] {
            if !settings.is_configured(kind) {
                tracing::warn!(provider = %kind, "{} not set", kind.api_key_var());
            }
        }

        Ok(Self {
            settings,
            #[cfg(any(feature = "gemini", feature = "openai"))]
            client,
        })
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn create(&self, kind: ProviderKind) -> Result<Arc<dyn TextGenerator>, ProviderError> {
        let config = self.settings.config(kind);
        let api_key = config
            .api_key
            .clone()
            .ok_or(ProviderError::MissingCredential(kind))?;

        match kind {
            #[cfg(feature = "gemini")]
            ProviderKind::Gemini => Ok(Arc::new(GeminiProvider::new(
                self.client.clone(),
                api_key,
                config,
                self.settings.request_timeout,
            ))),
            #[cfg(feature = "openai")]
            ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(
                self.client.clone(),
                api_key,
                config,
                self.settings.request_timeout,
            ))),
            #[allow(unreachable_patterns)]
            _ => {
                drop(api_key);
                Err(ProviderError::Disabled(kind))
            }
        }
    }
}

/// Map a transport failure, keeping timeouts distinguishable.
#[cfg(any(feature = "gemini", feature = "openai"))]
fn transport_error(provider: &str, err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Http(format!("{} request failed: {}", provider, err))
    }
}

/// Turn a non-success HTTP response into [`ProviderError::Api`].
#[cfg(any(feature = "gemini", feature = "openai"))]
async fn api_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Api { status, body }
}

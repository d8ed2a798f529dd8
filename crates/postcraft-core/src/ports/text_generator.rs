//! Text-completion provider ports.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ProviderKind;

/// A remote text-completion model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` and return the raw model text.
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Rough token estimate for `text`. Accuracy differs per provider.
    fn count_tokens(&self, text: &str) -> u64;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Builds a [`TextGenerator`] for the provider selected in a request.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, kind: ProviderKind) -> Result<Arc<dyn TextGenerator>, ProviderError>;
}

/// Provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{} API key not configured", .0.as_str().to_uppercase())]
    MissingCredential(ProviderKind),

    #[error("Provider '{0}' is not enabled in this build")]
    Disabled(ProviderKind),

    #[error("Provider request failed: {0}")]
    Http(String),

    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Configuration problems that no retry or fallback can fix.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredential(_) | ProviderError::Disabled(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = ProviderError::MissingCredential(ProviderKind::OpenAi);
        assert_eq!(err.to_string(), "OPENAI API key not configured");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_transport_errors_are_not_configuration() {
        assert!(!ProviderError::Http("connection reset".to_string()).is_configuration());
        assert!(!ProviderError::Timeout(Duration::from_secs(1)).is_configuration());
    }
}

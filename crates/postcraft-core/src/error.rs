//! Domain-level error types.

use thiserror::Error;

use crate::ports::ProviderError;

/// Domain errors - failures that end a generation run.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

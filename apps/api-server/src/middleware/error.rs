//! Error handling - RFC 7807 compliant responses.

use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use postcraft_core::ports::ProviderError;
use postcraft_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<String>),
    #[error("Rate limit exceeded until {reset_time}")]
    RateLimited {
        reset_time: DateTime<Utc>,
        retry_after: Duration,
    },
    /// Server-side setup problem such as a missing API key.
    #[error("{0}")]
    Configuration(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whole seconds until the client may retry, rounded up.
    fn retry_after_secs(wait: Duration) -> u64 {
        wait.as_secs() + u64::from(wait.subsec_nanos() > 0)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::RateLimited {
                reset_time,
                retry_after,
            } => {
                builder
                    .insert_header(("Retry-After", Self::retry_after_secs(*retry_after)))
                    .insert_header(("X-RateLimit-Remaining", 0u32))
                    .insert_header(("X-RateLimit-Reset", reset_time.timestamp()));
                ErrorResponse::too_many_requests(*reset_time)
            }
            AppError::Configuration(detail) => {
                tracing::error!("Configuration error: {}", detail);
                ErrorResponse::internal_error().with_detail(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        builder.json(error)
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        if err.is_configuration() {
            AppError::Configuration(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

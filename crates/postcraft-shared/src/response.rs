//! Problem responses for failed requests (RFC 7807).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details for HTTP APIs, with the two extension members
/// the generator endpoints use.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Individual validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// When a rate-limited client may retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_time: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: Vec::new(),
            reset_time: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            errors,
            ..Self::new(400, "Invalid request").with_detail("Request validation failed")
        }
    }

    pub fn too_many_requests(reset_time: DateTime<Utc>) -> Self {
        Self {
            reset_time: Some(reset_time),
            ..Self::new(429, "Too Many Requests")
                .with_detail("Rate limit exceeded. Please try again later.")
        }
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_members_are_omitted() {
        let value = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "about:blank", "title": "Internal Server Error", "status": 500})
        );
    }

    #[test]
    fn test_validation_lists_errors() {
        let value =
            serde_json::to_value(ErrorResponse::validation(vec!["topic is required".into()]))
                .unwrap();
        assert_eq!(value["status"], 400);
        assert_eq!(value["errors"][0], "topic is required");
    }

    #[test]
    fn test_rate_limit_carries_reset_time() {
        let reset = Utc::now();
        let value = serde_json::to_value(ErrorResponse::too_many_requests(reset)).unwrap();
        assert_eq!(value["status"], 429);
        assert!(value["resetTime"].is_string());
    }
}

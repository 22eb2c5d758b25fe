//! Error body returned by every failing route.
//!
//! Shape: `{"error": "...", "details": [...], "request_id": "..."}` where
//! `details` is omitted when empty and `request_id` when unknown.

use serde::{Deserialize, Serialize};

/// One entry of `ErrorResponse::details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ErrorDetail {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable summary.
    pub error: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,

    /// Request ID for debugging purposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = details;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    // Common error constructors
    pub fn invalid_post_data(details: Vec<ErrorDetail>) -> Self {
        Self::new("Invalid post data").with_details(details)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::new(format!(
            "Rate limit exceeded. Try again in {retry_after_secs} seconds."
        ))
    }
}

//! Error handling - maps failures to `{"error": ...}` JSON bodies.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use postboard_core::DomainError;
use postboard_shared::{ErrorDetail, ErrorResponse};
use std::fmt;

/// Application-level error type rendered as an `ErrorResponse`.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(Vec<ErrorDetail>),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(details) => write!(f, "Invalid post data: {:?}", details),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(self.body())
    }
}

impl AppError {
    /// JSON body for this error, without a request id.
    pub fn body(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::new(detail),
            AppError::Validation(details) => ErrorResponse::invalid_post_data(details.clone()),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidParameter { message, .. } => AppError::BadRequest(message),
            DomainError::Validation(errors) => AppError::Validation(
                errors
                    .into_iter()
                    .map(|e| ErrorDetail::field(e.field, e.message))
                    .collect(),
            ),
            err @ DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed query strings get the same JSON error shape as everything else.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Non-numeric post ids are reported as unknown posts.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, req: &HttpRequest| {
        let id = req.match_info().get("id").unwrap_or_default();
        AppError::NotFound(format!("Post with id {id} not found")).into()
    })
}

/// Decode a JSON object body into `T`.
pub fn decode_json_object<T: serde::de::DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        AppError::Validation(vec![ErrorDetail::message(format!(
            "Request body must be valid JSON: {e}"
        ))])
    })?;

    if !value.is_object() {
        return Err(AppError::Validation(vec![ErrorDetail::message(
            "Request body must be a JSON object.",
        )]));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(vec![ErrorDetail::message(e.to_string())]))
}

//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guild_common::AppError;
use guild_core::DomainError;
use guild_service::{services::first_validation_message, ServiceError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Client-facing text for store and internal failures
pub const GENERIC_SERVER_MESSAGE: &str = "An internal error occurred.";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let raw = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => AppError::status_for_domain(e),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::InvalidBody(_) => 400,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure came from the guide generator
    fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Service(ServiceError::Upstream(_) | ServiceError::Domain(DomainError::UpstreamError(_)))
                | Self::Domain(DomainError::UpstreamError(_))
                | Self::App(AppError::ExternalService(_) | AppError::Domain(DomainError::UpstreamError(_)))
        )
    }

    /// Message safe to show to a client
    ///
    /// Server failures collapse to a generic text, except upstream failures
    /// which keep their descriptive message.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() && !self.is_upstream() {
            return GENERIC_SERVER_MESSAGE.to_string();
        }
        match self {
            Self::App(e) => e.public_message(),
            Self::Validation(errors) => first_validation_message(errors),
            other => other.to_string(),
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path parameter error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// Error response body
///
/// `message` duplicates `error.message` for clients that only read the
/// top-level field.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    fn from_error(err: &ApiError) -> Self {
        let message = err.public_message();

        // Field breakdown for validation errors
        let details = if let ApiError::Validation(errors) = err {
            Some(serde_json::to_value(errors).unwrap_or_default())
        } else {
            None
        };

        Self {
            message: message.clone(),
            error: ErrorDetail {
                code: err.error_code().to_string(),
                message,
                details,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::InvalidPath("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Domain(DomainError::Unauthenticated).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Domain(DomainError::UsernameTaken).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Service(ServiceError::upstream("down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(
            ApiError::InvalidPath("test".to_string()).error_code(),
            "INVALID_PATH_PARAMETER"
        );
        assert_eq!(
            ApiError::Domain(DomainError::CannotDeleteSelf).error_code(),
            "CANNOT_DELETE_SELF"
        );
    }

    #[test]
    fn test_store_failures_are_masked() {
        let err = ApiError::Domain(DomainError::DatabaseError("relation users missing".into()));
        assert_eq!(err.public_message(), GENERIC_SERVER_MESSAGE);

        let err = ApiError::internal(anyhow::anyhow!("boom"));
        assert_eq!(err.public_message(), GENERIC_SERVER_MESSAGE);
    }

    #[test]
    fn test_upstream_message_is_kept() {
        let err = ApiError::Service(ServiceError::upstream(
            "AI service is not configured. Missing API_KEY.",
        ));
        assert_eq!(
            err.public_message(),
            "AI service is not configured. Missing API_KEY."
        );
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::Service(ServiceError::validation("Username is required."));
        let body = serde_json::to_value(ErrorBody::from_error(&err)).unwrap();

        assert_eq!(body["message"], "Username is required.");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Username is required.");
        assert!(body["error"].get("details").is_none());
    }
}

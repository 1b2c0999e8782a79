//! Application error types
//!
//! Unified error taxonomy shared by every layer above the domain.

use guild_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Generic message shown to clients for store and internal failures
const GENERIC_SERVER_MESSAGE: &str = "An internal error occurred.";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("No active session.")]
    Unauthenticated,

    #[error("Access denied.")]
    Forbidden,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Rate limiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Session store errors
    #[error("Session store error: {0}")]
    SessionStore(String),

    // External service errors
    #[error("{0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) | Self::InvalidInput(_) => 400,

            // 401 Unauthorized
            Self::Unauthenticated => 401,

            // 403 Forbidden
            Self::Forbidden => 403,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 429 Too Many Requests
            Self::RateLimitExceeded => 429,

            // 500 Internal Server Error
            Self::Database(_)
            | Self::SessionStore(_)
            | Self::ExternalService(_)
            | Self::Internal(_)
            | Self::Config(_) => 500,

            Self::Domain(e) => Self::status_for_domain(e),
        }
    }

    /// HTTP status code for a domain error
    #[must_use]
    pub fn status_for_domain(e: &DomainError) -> u16 {
        if e.is_authentication() {
            401
        } else if e.is_authorization() {
            403
        } else if e.is_not_found() {
            404
        } else if e.is_validation() {
            400
        } else if e.is_conflict() {
            409
        } else {
            500
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::SessionStore(_) => "SESSION_STORE_ERROR",
            Self::ExternalService(_) => "UPSTREAM_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Message safe to show to a client
    ///
    /// Store and internal failures are replaced by a generic text; upstream
    /// failures keep their descriptive message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::ExternalService(_) | Self::Domain(DomainError::UpstreamError(_)) => self.to_string(),
            _ if self.is_server_error() => GENERIC_SERVER_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.public_message(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use guild_core::UserId;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthenticated.status_code(), 401);
        assert_eq!(AppError::Forbidden.status_code(), 403);
        assert_eq!(AppError::NotFound("user".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Conflict("name".to_string()).status_code(), 409);
        assert_eq!(AppError::RateLimitExceeded.status_code(), 429);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(AppError::from(DomainError::Unauthenticated).status_code(), 401);
        assert_eq!(AppError::from(DomainError::UserNotActive).status_code(), 401);
        assert_eq!(
            AppError::from(DomainError::MissingCapability("MANAGE_USERS".into())).status_code(),
            403
        );
        assert_eq!(AppError::from(DomainError::UserNotFound(UserId::new())).status_code(), 404);
        assert_eq!(AppError::from(DomainError::CannotDeleteSelf).status_code(), 400);
        assert_eq!(AppError::from(DomainError::UsernameTaken).status_code(), 409);
        assert_eq!(AppError::from(DomainError::UpstreamError("x".into())).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthenticated.error_code(), "UNAUTHENTICATED");
        assert_eq!(AppError::NotFound("user".to_string()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::from(DomainError::UsernameTaken).error_code(), "USERNAME_TAKEN");
    }

    #[test]
    fn test_is_client_error() {
        assert!(AppError::Unauthenticated.is_client_error());
        assert!(AppError::NotFound("test".to_string()).is_client_error());
        assert!(!AppError::Database("test".to_string()).is_client_error());
    }

    #[test]
    fn test_store_failures_are_masked() {
        let err = AppError::Database("relation \"users\" does not exist".to_string());
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, GENERIC_SERVER_MESSAGE);

        let err = AppError::from(DomainError::DatabaseError("pool timed out".to_string()));
        assert_eq!(err.public_message(), GENERIC_SERVER_MESSAGE);
    }

    #[test]
    fn test_upstream_failures_keep_message() {
        let err = AppError::ExternalService("Failed to generate AI guide.".to_string());
        assert_eq!(err.public_message(), "Failed to generate AI guide.");
        assert_eq!(err.error_code(), "UPSTREAM_FAILURE");
    }

    #[test]
    fn test_error_response() {
        let err = AppError::NotFound("user".to_string());
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found: user");
        assert!(response.details.is_none());
    }
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BuildId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("No user named {0}")]
    UserNameNotFound(String),

    #[error("Build not found: {0}")]
    BuildNotFound(BuildId),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Spell not found: {0}")]
    SpellNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Item {item} cannot be equipped in the {slot} slot")]
    SlotMismatch { item: String, slot: String },

    #[error("You cannot delete your own account.")]
    CannotDeleteSelf,

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("No active session.")]
    Unauthenticated,

    #[error("User account is not active")]
    UserNotActive,

    #[error("Access denied. Missing capability: {0}")]
    MissingCapability(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already exists.")]
    UsernameTaken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Session store error: {0}")]
    SessionStoreError(String),

    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UserNameNotFound(_) => "UNKNOWN_USER",
            Self::BuildNotFound(_) => "UNKNOWN_BUILD",
            Self::ItemNotFound(_) => "UNKNOWN_ITEM",
            Self::SpellNotFound(_) => "UNKNOWN_SPELL",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::SlotMismatch { .. } => "SLOT_MISMATCH",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",

            // Authentication / Authorization
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UserNotActive => "USER_NOT_ACTIVE",
            Self::MissingCapability(_) => "FORBIDDEN",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::SessionStoreError(_) => "SESSION_STORE_ERROR",
            Self::UpstreamError(_) => "UPSTREAM_FAILURE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UserNameNotFound(_)
                | Self::BuildNotFound(_)
                | Self::ItemNotFound(_)
                | Self::SpellNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::SlotMismatch { .. }
                | Self::CannotDeleteSelf
        )
    }

    /// Check if the caller could not be identified
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::UserNotActive)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingCapability(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken)
    }
}

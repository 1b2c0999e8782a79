//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod audit_log;
pub mod auth;
pub mod authorization;
pub mod build;
pub mod catalog;
pub mod context;
pub mod error;
pub mod gemini;
pub mod guide;
pub mod guild;
pub mod user;

// Re-export all services for convenience
pub use audit_log::AuditLogService;
pub use auth::AuthService;
pub use authorization::AuthorizationService;
pub use build::BuildService;
pub use catalog::CatalogService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{first_validation_message, ServiceError, ServiceResult};
pub use gemini::GeminiGuideGenerator;
pub use guide::{render_prompt, GuideService};
pub use guild::GuildService;
pub use user::UserDirectoryService;

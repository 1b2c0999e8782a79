//! # guild-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuditLogService, AuthService, AuthorizationService, BuildService, CatalogService,
    GeminiGuideGenerator, GuideService, GuildService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ServiceSettings, UserDirectoryService,
};

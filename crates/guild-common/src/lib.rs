//! # guild-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ActivityConfig, AiConfig, AppConfig, AppSettings, AuthConfig, CatalogConfig, ConfigError,
    CorsConfig, DatabaseConfig, Environment, RateLimitConfig, RedisConfig, ServerConfig,
    SessionBackend, SessionConfig, StorageBackend, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};

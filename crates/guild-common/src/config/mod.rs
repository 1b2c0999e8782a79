//! Configuration structs

mod app_config;

pub use app_config::{
    ActivityConfig, AiConfig, AppConfig, AppSettings, AuthConfig, CatalogConfig, ConfigError,
    CorsConfig, DatabaseConfig, Environment, RateLimitConfig, RedisConfig, ServerConfig,
    SessionBackend, SessionConfig, StorageBackend, StorageConfig,
};

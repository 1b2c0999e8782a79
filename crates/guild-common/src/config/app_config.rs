//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    pub session: SessionConfig,
    pub redis: Option<RedisConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub ai: AiConfig,
    pub activity: ActivityConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request limit; outbound AI calls must finish inside it
    pub request_timeout_seconds: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Where users, builds, catalog and logs are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected postgres or memory, got {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

/// Where sessions are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

impl FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(format!("expected memory or redis, got {other}")),
        }
    }
}

/// Session cookie and store configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// `None` keeps sessions until logout or restart
    pub ttl_seconds: Option<u64>,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Build guide generator configuration
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Missing key disables guide generation
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Language the guide is written in
    pub language: String,
}

/// Guild activity configuration
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    pub feed_limit: i64,
    /// Offset from UTC used for the weekday chart
    pub utc_offset_minutes: i32,
    pub presence_window_seconds: i64,
}

/// Authentication shortcuts
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_test_login: bool,
    pub admin_test_name: String,
}

/// Reference data loading
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub seed_on_start: bool,
    /// Upstream `spells.json` dump imported at startup
    pub spells_file: Option<String>,
}

// Default value functions
fn default_app_name() -> String {
    "guild-dashboard".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:8000".to_string()]
}

fn default_cookie_name() -> String {
    "sessionId".to_string()
}

fn default_ai_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_ai_timeout() -> u64 {
    25
}

fn default_ai_language() -> String {
    "Spanish".to_string()
}

fn default_feed_limit() -> i64 {
    200
}

fn default_presence_window() -> i64 {
    300
}

fn default_admin_test_name() -> String {
    "Admin".to_string()
}

/// Reads one variable and parses it, keeping absent values distinct from bad ones
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &'static str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, key: &'static str, default: impl FnOnce() -> String) -> String {
        self.raw(key).unwrap_or_else(default)
    }

    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw(key)
            .map(|v| v.parse::<T>().map_err(|e| ConfigError::InvalidValue(key, e.to_string())))
            .transpose()
    }

    fn parse_or<T>(&self, key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.parse(key)?.unwrap_or_else(default))
    }

    fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.raw(key).map(|v| v.to_lowercase()) {
            None => Ok(default),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
            Some(v) => Err(ConfigError::InvalidValue(key, v)),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let app_env: Environment = vars.parse_or("APP_ENV", Environment::default)?;
        let database_url = vars.raw("DATABASE_URL");

        let backend = match vars.parse::<StorageBackend>("STORAGE_BACKEND")? {
            Some(backend) => backend,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        let database = match (backend, database_url) {
            (StorageBackend::Postgres, None) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (StorageBackend::Postgres, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: vars.flag("DATABASE_RUN_MIGRATIONS", true)?,
            }),
            (StorageBackend::Memory, _) => None,
        };

        let session_backend = vars.parse_or("SESSION_BACKEND", || SessionBackend::Memory)?;
        let redis = match (session_backend, vars.raw("REDIS_URL")) {
            (SessionBackend::Redis, None) => return Err(ConfigError::MissingVar("REDIS_URL")),
            (_, Some(url)) => Some(RedisConfig {
                url,
                max_connections: vars.parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            }),
            (SessionBackend::Memory, None) => None,
        };

        let utc_offset_minutes: i32 = vars.parse_or("ACTIVITY_UTC_OFFSET_MINUTES", || 0)?;
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::InvalidValue(
                "ACTIVITY_UTC_OFFSET_MINUTES",
                utc_offset_minutes.to_string(),
            ));
        }

        let request_timeout_seconds: u64 =
            vars.parse_or("API_REQUEST_TIMEOUT_SECONDS", default_request_timeout)?;
        if request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("API_REQUEST_TIMEOUT_SECONDS", "0".to_string()));
        }

        let ai_timeout_seconds: u64 = vars.parse_or("AI_TIMEOUT_SECONDS", default_ai_timeout)?;
        if ai_timeout_seconds == 0 || ai_timeout_seconds >= request_timeout_seconds {
            return Err(ConfigError::InvalidValue(
                "AI_TIMEOUT_SECONDS",
                format!(
                    "{ai_timeout_seconds} (must be between 1 and {} seconds)",
                    request_timeout_seconds - 1
                ),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.string("APP_NAME", default_app_name),
                env: app_env,
            },
            api: ServerConfig {
                host: vars.string("API_HOST", default_host),
                port: vars.parse_or("API_PORT", default_port)?,
                request_timeout_seconds,
            },
            storage: StorageConfig { backend },
            database,
            session: SessionConfig {
                backend: session_backend,
                ttl_seconds: vars.parse("SESSION_TTL_SECONDS")?,
                cookie_name: default_cookie_name(),
                cookie_secure: vars.flag("SESSION_COOKIE_SECURE", app_env.is_production())?,
            },
            redis,
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .raw("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(default_cors_origins),
            },
            ai: AiConfig {
                api_key: vars.raw("AI_API_KEY").or_else(|| vars.raw("API_KEY")),
                model: vars.string("AI_MODEL", default_ai_model),
                base_url: vars.string("AI_BASE_URL", default_ai_base_url),
                timeout_seconds: ai_timeout_seconds,
                language: vars.string("AI_GUIDE_LANGUAGE", default_ai_language),
            },
            activity: ActivityConfig {
                feed_limit: vars.parse_or("ACTIVITY_FEED_LIMIT", default_feed_limit)?,
                utc_offset_minutes,
                presence_window_seconds: vars
                    .parse_or("PRESENCE_WINDOW_SECONDS", default_presence_window)?,
            },
            auth: AuthConfig {
                admin_test_login: vars.flag("AUTH_ADMIN_TEST_LOGIN", !app_env.is_production())?,
                admin_test_name: vars.string("AUTH_ADMIN_TEST_NAME", default_admin_test_name),
            },
            catalog: CatalogConfig {
                seed_on_start: vars.flag("CATALOG_SEED", backend == StorageBackend::Memory)?,
                spells_file: vars.raw("CATALOG_SPELLS_FILE"),
            },
        })
    }

    /// Fully in-memory configuration with development defaults
    ///
    /// Used by tests and local demos; nothing external is contacted.
    pub fn in_memory() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| (key == "STORAGE_BACKEND").then(|| "memory".to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 30,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults_without_any_variable() {
        let config = load(&[]).unwrap();
        assert_eq!(config.app.name, "guild-dashboard");
        assert_eq!(config.api.port, 3001);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.session.cookie_name, "sessionId");
        assert!(config.session.ttl_seconds.is_none());
        assert!(!config.session.cookie_secure);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:8000"]);
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.activity.feed_limit, 200);
        assert_eq!(config.activity.presence_window_seconds, 300);
        assert!(config.auth.admin_test_login);
        assert_eq!(config.auth.admin_test_name, "Admin");
        assert!(config.catalog.seed_on_start);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/guild")]).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 20);
        assert!(db.run_migrations);
        assert!(!config.catalog.seed_on_start);
    }

    #[test]
    fn test_postgres_without_url_is_an_error() {
        let err = load(&[("STORAGE_BACKEND", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_redis_sessions_require_url() {
        let err = load(&[("SESSION_BACKEND", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("REDIS_URL")));

        let config = load(&[("SESSION_BACKEND", "redis"), ("REDIS_URL", "redis://localhost")]).unwrap();
        assert_eq!(config.redis.unwrap().max_connections, 10);
    }

    #[test]
    fn test_production_hardening_defaults() {
        let config = load(&[("APP_ENV", "production")]).unwrap();
        assert!(config.session.cookie_secure);
        assert!(!config.auth.admin_test_login);

        let config = load(&[("APP_ENV", "production"), ("AUTH_ADMIN_TEST_LOGIN", "true")]).unwrap();
        assert!(config.auth.admin_test_login);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = load(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));

        let err = load(&[("CATALOG_SEED", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("CATALOG_SEED", _)));

        let err = load(&[("ACTIVITY_UTC_OFFSET_MINUTES", "1440")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("ACTIVITY_UTC_OFFSET_MINUTES", _)));
    }

    #[test]
    fn test_ai_timeout_must_fit_inside_request_timeout() {
        let config = load(&[]).unwrap();
        assert!(config.ai.timeout_seconds < config.api.request_timeout_seconds);

        let err = load(&[("AI_TIMEOUT_SECONDS", "30")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("AI_TIMEOUT_SECONDS", _)));

        let err = load(&[("AI_TIMEOUT_SECONDS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("AI_TIMEOUT_SECONDS", _)));

        let config = load(&[
            ("API_REQUEST_TIMEOUT_SECONDS", "120"),
            ("AI_TIMEOUT_SECONDS", "90"),
        ])
        .unwrap();
        assert_eq!(config.api.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.ai.timeout_seconds, 90);

        let err = load(&[("API_REQUEST_TIMEOUT_SECONDS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_REQUEST_TIMEOUT_SECONDS", _)));
    }

    #[test]
    fn test_cors_origins_are_split() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:8000, https://guild.example.com,",
        )])
        .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:8000", "https://guild.example.com"]
        );
    }

    #[test]
    fn test_legacy_api_key_name_is_accepted() {
        let config = load(&[("API_KEY", "k-123")]).unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn test_in_memory_config() {
        let config = AppConfig::in_memory().unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.database.is_none());
    }
}

//! Service context - dependency container for services
//!
//! Holds all repositories, the session store, the guide generator and the
//! tunables services read at request time.

use std::sync::Arc;

use chrono::{Duration, FixedOffset, Offset, Utc};

use guild_common::AppConfig;
use guild_core::traits::{
    ActivityRepository, AuditLogRepository, BuildRepository, GuideGenerator, ItemRepository,
    SessionStore, SpellRepository, UserRepository,
};
use guild_db::{MemoryStore, PgPool};

use super::error::{ServiceError, ServiceResult};

/// Request-time tunables derived from configuration
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Maximum number of events returned by the activity feed
    pub activity_feed_limit: i64,
    /// Local offset used for weekday bucketing
    pub activity_offset: FixedOffset,
    /// A member seen within this window counts as online
    pub presence_window: Duration,
    pub admin_test_login: bool,
    pub admin_test_name: String,
    /// Language requested from the guide generator
    pub guide_language: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            activity_feed_limit: 200,
            activity_offset: Utc.fix(),
            presence_window: Duration::seconds(300),
            admin_test_login: true,
            admin_test_name: "Admin".to_string(),
            guide_language: "Spanish".to_string(),
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            activity_feed_limit: config.activity.feed_limit,
            activity_offset: FixedOffset::east_opt(config.activity.utc_offset_minutes * 60)
                .unwrap_or_else(|| Utc.fix()),
            presence_window: Duration::seconds(config.activity.presence_window_seconds),
            admin_test_login: config.auth.admin_test_login,
            admin_test_name: config.auth.admin_test_name.clone(),
            guide_language: config.ai.language.clone(),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent for the in-memory backend
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    item_repo: Arc<dyn ItemRepository>,
    spell_repo: Arc<dyn SpellRepository>,
    build_repo: Arc<dyn BuildRepository>,
    activity_repo: Arc<dyn ActivityRepository>,

    // Sessions
    session_store: Arc<dyn SessionStore>,

    // Upstream text generation, absent when not configured
    guide_generator: Option<Arc<dyn GuideGenerator>>,

    settings: ServiceSettings,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if the relational backend is in use
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn item_repo(&self) -> &dyn ItemRepository {
        self.item_repo.as_ref()
    }

    pub fn spell_repo(&self) -> &dyn SpellRepository {
        self.spell_repo.as_ref()
    }

    pub fn build_repo(&self) -> &dyn BuildRepository {
        self.build_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    // === Sessions ===

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    // === Upstream ===

    pub fn guide_generator(&self) -> Option<&dyn GuideGenerator> {
        self.guide_generator.as_deref()
    }

    // === Settings ===

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("guide_generator", &self.guide_generator.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    item_repo: Option<Arc<dyn ItemRepository>>,
    spell_repo: Option<Arc<dyn SpellRepository>>,
    build_repo: Option<Arc<dyn BuildRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    guide_generator: Option<Arc<dyn GuideGenerator>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one in-memory store for every repository
    pub fn memory_store(self, store: Arc<MemoryStore>) -> Self {
        self.user_repo(store.clone())
            .audit_repo(store.clone())
            .item_repo(store.clone())
            .spell_repo(store.clone())
            .build_repo(store.clone())
            .activity_repo(store)
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn item_repo(mut self, repo: Arc<dyn ItemRepository>) -> Self {
        self.item_repo = Some(repo);
        self
    }

    pub fn spell_repo(mut self, repo: Arc<dyn SpellRepository>) -> Self {
        self.spell_repo = Some(repo);
        self
    }

    pub fn build_repo(mut self, repo: Arc<dyn BuildRepository>) -> Self {
        self.build_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn guide_generator(mut self, generator: Arc<dyn GuideGenerator>) -> Self {
        self.guide_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            audit_repo: required(self.audit_repo, "audit_repo")?,
            item_repo: required(self.item_repo, "item_repo")?,
            spell_repo: required(self.spell_repo, "spell_repo")?,
            build_repo: required(self.build_repo, "build_repo")?,
            activity_repo: required(self.activity_repo, "activity_repo")?,
            session_store: required(self.session_store, "session_store")?,
            guide_generator: self.guide_generator,
            settings: self.settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guild_cache::InMemorySessionStore;

    #[test]
    fn test_build_requires_session_store() {
        let err = ServiceContextBuilder::new()
            .memory_store(Arc::new(MemoryStore::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("session_store"));
    }

    #[test]
    fn test_memory_context() {
        let ctx = ServiceContextBuilder::new()
            .memory_store(Arc::new(MemoryStore::new()))
            .session_store(Arc::new(InMemorySessionStore::new()))
            .build()
            .unwrap();
        assert!(ctx.pool().is_none());
        assert!(ctx.guide_generator().is_none());
        assert_eq!(ctx.settings().activity_feed_limit, 200);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = AppConfig::in_memory().unwrap();
        config.activity.utc_offset_minutes = -300;
        let settings = ServiceSettings::from_config(&config);
        assert_eq!(settings.activity_offset.local_minus_utc(), -300 * 60);
        assert_eq!(settings.presence_window, Duration::seconds(300));
    }
}

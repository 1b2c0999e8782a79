//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use guild_cache::{InMemorySessionStore, RedisPool, RedisSessionStore};
use guild_common::{AppConfig, AppError, SessionBackend, StorageBackend};
use guild_core::{GuideGenerator, SessionStore};
use guild_db::{
    create_pool, import_spell_file, run_migrations, seed_catalog, MemoryStore,
    PgActivityRepository, PgAuditLogRepository, PgBuildRepository, PgItemRepository,
    PgSpellRepository, PgUserRepository, PoolSettings,
};
use guild_service::{GeminiGuideGenerator, ServiceContext, ServiceContextBuilder, ServiceSettings};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.api.request_timeout());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let builder = storage_builder(&config).await?;

    let session_store = create_session_store(&config)?;

    let builder = match GeminiGuideGenerator::from_config(&config.ai)
        .map_err(|e| AppError::Config(e.to_string()))?
    {
        Some(generator) => {
            info!(model = %config.ai.model, "AI guide generator configured");
            builder.guide_generator(Arc::new(generator) as Arc<dyn GuideGenerator>)
        }
        None => {
            warn!("AI_API_KEY not set; guide generation is disabled");
            builder
        }
    };

    let service_context = builder
        .session_store(session_store)
        .settings(ServiceSettings::from_config(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    load_catalog(&service_context, &config).await?;

    Ok(AppState::new(service_context, config))
}

/// Repositories for the configured storage backend
async fn storage_builder(config: &AppConfig) -> Result<ServiceContextBuilder, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(ServiceContextBuilder::new().memory_store(Arc::new(MemoryStore::new())))
        }
        StorageBackend::Postgres => {
            let db = config.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let settings = PoolSettings::from(db);
            let pool = create_pool(&settings)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if db.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("Database migrations applied");
            }

            Ok(ServiceContextBuilder::new()
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
                .item_repo(Arc::new(PgItemRepository::new(pool.clone())))
                .spell_repo(Arc::new(PgSpellRepository::new(pool.clone())))
                .build_repo(Arc::new(PgBuildRepository::new(pool.clone())))
                .activity_repo(Arc::new(PgActivityRepository::new(pool.clone())))
                .pool(pool))
        }
    }
}

/// Session store for the configured session backend
fn create_session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, AppError> {
    let ttl = config.session.ttl_seconds;
    match config.session.backend {
        SessionBackend::Memory => {
            info!(ttl_seconds = ?ttl, "Using in-memory sessions");
            Ok(Arc::new(InMemorySessionStore::with_ttl(ttl)))
        }
        SessionBackend::Redis => {
            let redis = config.redis.as_ref().ok_or_else(|| {
                AppError::Config("REDIS_URL is required for the redis session backend".to_string())
            })?;

            info!("Connecting to Redis...");
            let pool =
                RedisPool::from_config(redis).map_err(|e| AppError::SessionStore(e.to_string()))?;
            info!("Redis pool created");

            Ok(Arc::new(RedisSessionStore::new(pool, ttl)))
        }
    }
}

/// Seed the built-in catalog and import a spell export when configured
async fn load_catalog(ctx: &ServiceContext, config: &AppConfig) -> Result<(), AppError> {
    if config.catalog.seed_on_start {
        let (items, spells) = seed_catalog(ctx.item_repo(), ctx.spell_repo()).await?;
        info!(items, spells, "Catalog seeded");
    }

    if let Some(path) = &config.catalog.spells_file {
        let imported = import_spell_file(Path::new(path), ctx.spell_repo()).await?;
        info!(path = %path, imported, "Spell file imported");
    }

    Ok(())
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(address.as_str())
        .await
        .map_err(|e| AppError::Config(format!("Invalid listen address {address}: {e}")))?
        .next()
        .ok_or_else(|| AppError::Config(format!("No address resolved for {address}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}

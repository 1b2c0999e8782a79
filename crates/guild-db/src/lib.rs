//! # guild-db
//!
//! Storage layer implementing the repository traits from `guild-core`.
//!
//! ## Overview
//!
//! Two interchangeable backends:
//!
//! - PostgreSQL via SQLx: connection pool, `FromRow` models, entity mappers
//!   and one repository per aggregate
//! - [`MemoryStore`]: a single in-process store implementing every trait,
//!   used for development and tests
//!
//! The [`seed`] module loads the built-in item catalog and imports the game's
//! spell export into either backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guild_db::{create_pool, run_migrations, PgUserRepository, PoolSettings};
//! use guild_core::traits::UserRepository;
//!
//! async fn example(settings: &PoolSettings) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(settings).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     let everyone = users.list().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod seed;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolSettings};
pub use repositories::{
    PgActivityRepository, PgAuditLogRepository, PgBuildRepository, PgItemRepository,
    PgSpellRepository, PgUserRepository,
};
pub use seed::{import_spell_file, parse_spell_dump, seed_catalog};

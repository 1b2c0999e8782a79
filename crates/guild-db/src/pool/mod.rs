//! Database connection pool and schema management

mod postgres;

pub use postgres::{create_pool, run_migrations, PgPool, PoolSettings};

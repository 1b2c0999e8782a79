//! # guild-cache
//!
//! Backends for the `SessionStore` port.
//!
//! ## Features
//!
//! - **In-process**: `DashMap` keyed by session id, optional TTL
//! - **Redis**: shared store over a deadpool connection pool, keys
//!   namespaced per process boot
//!
//! ## Example
//!
//! ```ignore
//! use guild_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//! use guild_core::{SessionId, SessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool, None);
//!
//! let sid = SessionId::generate();
//! sessions.insert(&sid, user_id).await?;
//! assert_eq!(sessions.get(&sid).await?, Some(user_id));
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session stores
pub use session::{InMemorySessionStore, RedisSessionStore};

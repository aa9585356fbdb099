//! # Taskhive DB
//!
//! PostgreSQL-backed implementations of the auth core's store traits, plus
//! connection pool initialization.
//!
//! Queries use the runtime `sqlx` API (not the compile-time macros) so the
//! workspace builds without a live database. Schema lives in `migrations/`
//! at the workspace root.
//!
//! # Example
//!
//! ```ignore
//! use taskhive_db::{PgIdentityStore, PgSessionStore, PgWorkspaceStore, init_db_pool};
//!
//! let pool = init_db_pool().await;
//! let sessions = PgSessionStore::new(pool.clone());
//! let identities = PgIdentityStore::new(pool.clone());
//! let workspaces = PgWorkspaceStore::new(pool);
//! ```

pub mod identities;
pub mod sessions;
pub mod workspaces;

pub use identities::PgIdentityStore;
pub use sessions::PgSessionStore;
pub use workspaces::PgWorkspaceStore;

use std::env;

/// Initializes the PostgreSQL connection pool from `DATABASE_URL`.
///
/// Called once at startup; the pool is cheap to clone and shared by the
/// store implementations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable;
/// there is no degraded mode without a primary store.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

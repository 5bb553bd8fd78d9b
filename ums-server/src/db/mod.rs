//! Database layer - connection pool, schema, seed data and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - One statement per repository call, bound parameters only
//! - Startup steps return errors; the caller decides whether to abort

pub mod pool;
pub mod repos;
pub mod schema;
pub mod seed;

pub use sqlx::SqlitePool;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::{DbError, UserRepo};
pub use schema::ensure_schema;
pub use seed::{seed_if_empty, SeedOutcome, SEED_USERS};

/// Prepare a database for serving: create the schema, then seed it.
///
/// Returns `None` for the seed outcome when `seed` is false. Any error
/// here means the database is unusable and the server must not start.
pub async fn initialize(pool: &SqlitePool, seed: bool) -> Result<Option<SeedOutcome>, DbError> {
    ensure_schema(pool).await?;

    if !seed {
        tracing::info!("seeding disabled");
        return Ok(None);
    }

    seed_if_empty(pool).await.map(Some)
}

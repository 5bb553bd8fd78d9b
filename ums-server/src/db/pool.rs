//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::DbError;

/// Default maximum connections for the pool.
/// Kept low for a single-file database.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before SQLITE_BUSY.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (or create) a SQLite database file and return a pool for it.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// database cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("./users.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, DbError> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a SQLite database file with a custom pool size.
pub async fn create_pool_with_options(
    path: &Path,
    max_connections: u32,
) -> Result<SqlitePool, DbError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!(path = %path.display(), max_connections, "sqlite pool opened");
    Ok(pool)
}

/// Create a pool over a private in-memory database.
///
/// Every SQLite connection to `:memory:` gets its own database, so the
/// pool is pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

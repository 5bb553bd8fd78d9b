//! Schema creation for the users table

use sqlx::SqlitePool;

use super::DbError;

/// AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL
    )
"#;

/// Create the users table if it does not exist. Safe to call on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;

    tracing::info!("users table ready");
    Ok(())
}

//! User repository
//!
//! One bound-parameter statement per call, no transactions. Each call
//! is atomic at SQLite's statement level and nothing more.

use sqlx::SqlitePool;

use super::DbError;
use crate::models::{NewUser, User};

/// User repository
///
/// Cheap to clone; clones share the same pool.
#[derive(Debug, Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users in insertion order. Empty table gives an empty vec.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Get a single user by id.
    ///
    /// Returns [`DbError::NotFound`] when no row matches, so callers can
    /// tell an absent user apart from a driver failure.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "User",
                id,
            })
    }

    /// Insert a user and return the id SQLite assigned to it.
    pub async fn insert(&self, user: &NewUser) -> Result<i64, DbError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite name and email of a user.
    ///
    /// Returns the number of rows changed. An unknown id changes zero
    /// rows and is not an error.
    pub async fn update(&self, id: i64, user: &NewUser) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&user.name)
            .bind(&user.email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user. Same zero-rows contract as [`UserRepo::update`].
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Round-trip a trivial query to check the pool is usable.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

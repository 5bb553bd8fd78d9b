//! Sample data inserted into an empty users table

use sqlx::SqlitePool;

use super::{DbError, UserRepo};
use crate::models::NewUser;

/// Sample users, inserted in this order.
pub const SEED_USERS: [(&str, &str); 5] = [
    ("John Doe", "john.doe@example.com"),
    ("Jane Smith", "jane.smith@example.com"),
    ("Alice Johnson", "alice.j@example.com"),
    ("Bob Williams", "bob.w@example.com"),
    ("Eva Brown", "eva.b@example.com"),
];

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Table was empty; `inserted` of the sample rows went in.
    Seeded { inserted: usize },
    /// Table already had rows; nothing was written.
    Skipped { existing: i64 },
}

/// Insert [`SEED_USERS`] if the users table is empty.
///
/// A failed insert is logged and the remaining rows are still attempted.
/// Only a failure to count the existing rows is returned as an error.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedOutcome, DbError> {
    let repo = UserRepo::new(pool.clone());

    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "users table already populated, skipping seed");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let mut inserted = 0;
    for (name, email) in SEED_USERS {
        match repo.insert(&NewUser::new(name, email)).await {
            Ok(_) => inserted += 1,
            Err(e) => tracing::warn!(name, error = %e, "failed to insert seed user"),
        }
    }

    tracing::info!(inserted, "seeded users table");
    Ok(SeedOutcome::Seeded { inserted })
}

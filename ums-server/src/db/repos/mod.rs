//! Repository implementations

pub mod users;

pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! User entity and request shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// A persisted user row.
///
/// `id` is assigned by SQLite on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Both fields must be present. Any other field (a client-sent `id`
/// included) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach a storage-assigned id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Numeric user id taken from a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Parse a path segment as a user id.
    ///
    /// # Example
    /// ```
    /// use ums_server::models::UserId;
    ///
    /// assert_eq!(UserId::parse("42").unwrap().get(), 42);
    /// assert!(UserId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| ValidationError::InvalidId {
                value: s.to_owned(),
                reason: e.to_string(),
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

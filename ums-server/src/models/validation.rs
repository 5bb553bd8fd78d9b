//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Path segment is not a valid integer id
    InvalidId { value: String, reason: String },

    /// Request body could not be read as a user
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { value, reason } => {
                write!(f, "invalid user id '{}': {}", value, reason)
            }
            Self::InvalidBody { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

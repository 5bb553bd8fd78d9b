//! API error types with IntoResponse
//!
//! Read endpoints answer errors with `{"error": "..."}`; mutating
//! endpoints wrap the same error in an [`Envelope`] via [`WriteError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::envelope::Envelope;
use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Bad id or body (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i64 },

    /// Database error (500, logged)
    Database {
        context: &'static str,
        source: DbError,
    },
}

impl ApiError {
    /// Classify a repository error, keeping not-found distinct.
    pub fn from_db(context: &'static str, e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            source => Self::Database { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message shown to the client.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(ValidationError::InvalidId { .. }) => "Invalid user ID".to_string(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, .. } => format!("{} not found", resource),
            Self::Database { context, .. } => (*context).to_string(),
        }
    }

    /// Underlying error text.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Database { source, .. } => source.to_string(),
        }
    }

    fn log(&self) {
        if let Self::Database { context, source } = self {
            tracing::error!(error = %source, "{}", context);
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Which mutating endpoint failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl WriteOp {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Resource created successfully.",
            Self::Update => "Resource updated successfully.",
            Self::Delete => "Resource deleted successfully.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating resource.",
            Self::Update => "Error updating resource.",
            Self::Delete => "Error deleting resource.",
        }
    }
}

/// Error from a mutating endpoint, rendered as a failed [`Envelope`].
#[derive(Debug)]
pub struct WriteError {
    pub op: WriteOp,
    pub source: ApiError,
}

impl WriteError {
    pub fn new(op: WriteOp, source: impl Into<ApiError>) -> Self {
        Self {
            op,
            source: source.into(),
        }
    }

    pub fn database(op: WriteOp, e: DbError) -> Self {
        Self::new(op, ApiError::from_db(op.failure_message(), e))
    }
}

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        self.source.log();

        let message = match &self.source {
            ApiError::Validation(ValidationError::InvalidId { .. }) => "Invalid user ID.",
            _ => self.op.failure_message(),
        };
        let body = Envelope::failure(message, self.source.detail());

        (self.source.status(), Json(body)).into_response()
    }
}

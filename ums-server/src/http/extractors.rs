//! Custom Axum extractors
//!
//! Both reject with [`ApiError`]. Mutating handlers take them as
//! `Result<_, ApiError>` so the rejection can be wrapped in an envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::{NewUser, UserId, ValidationError};

/// Extract and parse a numeric user id from path
pub struct ValidUserId(pub UserId);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(ValidationError::InvalidId {
                    value: String::new(),
                    reason: e.body_text(),
                })
            })?;

        Ok(Self(UserId::parse(&raw)?))
    }
}

/// Extract a `{name, email}` JSON body
pub struct UserBody(pub NewUser);

impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(user) = Json::<NewUser>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                ApiError::Validation(ValidationError::InvalidBody {
                    reason: e.body_text(),
                })
            })?;

        Ok(Self(user))
    }
}

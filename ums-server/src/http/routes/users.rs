//! User endpoints
//!
//! Reads return bare users; writes return an [`Envelope`].

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::envelope::Envelope;
use crate::http::error::{ApiError, WriteError, WriteOp};
use crate::http::extractors::{UserBody, ValidUserId};
use crate::http::server::AppState;
use crate::models::User;

type WriteResult = Result<(StatusCode, Json<Envelope>), WriteError>;

/// GET /users - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_db("Error fetching users", e))?;

    Ok(Json(users))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get(id.get())
        .await
        .map_err(|e| ApiError::from_db("Error fetching user", e))?;

    Ok(Json(user))
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<UserBody, ApiError>,
) -> WriteResult {
    let op = WriteOp::Create;
    let UserBody(new_user) = body.map_err(|e| WriteError::new(op, e))?;

    let id = state
        .users
        .insert(&new_user)
        .await
        .map_err(|e| WriteError::database(op, e))?;
    tracing::info!(id, "user created");

    let user = new_user.into_user(id);
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(op.success_message(), Some(user))),
    ))
}

/// PUT /users/{id} - overwrite name and email
async fn update_user(
    State(state): State<Arc<AppState>>,
    id: Result<ValidUserId, ApiError>,
    body: Result<UserBody, ApiError>,
) -> WriteResult {
    let op = WriteOp::Update;
    let ValidUserId(id) = id.map_err(|e| WriteError::new(op, e))?;
    let UserBody(new_user) = body.map_err(|e| WriteError::new(op, e))?;

    let changed = state
        .users
        .update(id.get(), &new_user)
        .await
        .map_err(|e| WriteError::database(op, e))?;
    if changed == 0 {
        tracing::debug!(id = id.get(), "update matched no user");
    }

    let user = new_user.into_user(id.get());
    Ok((
        StatusCode::OK,
        Json(Envelope::success(op.success_message(), Some(user))),
    ))
}

/// DELETE /users/{id} - remove a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    id: Result<ValidUserId, ApiError>,
) -> WriteResult {
    let op = WriteOp::Delete;
    let ValidUserId(id) = id.map_err(|e| WriteError::new(op, e))?;

    let changed = state
        .users
        .delete(id.get())
        .await
        .map_err(|e| WriteError::database(op, e))?;
    if changed == 0 {
        tracing::debug!(id = id.get(), "delete matched no user");
    }

    Ok((
        StatusCode::OK,
        Json(Envelope::success(op.success_message(), None)),
    ))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::db::{create_memory_pool, ensure_schema, initialize, UserRepo};
    use crate::http::server::{build_router, CorsConfig};

    const BODY_LIMIT: usize = 64 * 1024;

    async fn app(seed: bool) -> Router {
        let pool = create_memory_pool().await.unwrap();
        if seed {
            initialize(&pool, true).await.unwrap();
        } else {
            ensure_schema(&pool).await.unwrap();
        }
        build_router(UserRepo::new(pool), &CorsConfig::default()).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_owned())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn list_returns_seed_users() {
        let app = app(true).await;

        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["John Doe", "Jane Smith", "Alice Johnson", "Bob Williams", "Eva Brown"]
        );
    }

    #[tokio::test]
    async fn list_empty_is_empty_array() {
        let app = app(false).await;

        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn create_then_get() {
        let app = app(false).await;

        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(r#"{"name": "X", "email": "x@x.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Resource created successfully.");
        let id = body["data"]["id"].as_i64().unwrap();
        assert!(id > 0);

        let (status, user) = send(&app, "GET", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["id"], id);
        assert_eq!(user["name"], "X");
        assert_eq!(user["email"], "x@x.com");
    }

    #[tokio::test]
    async fn get_non_numeric_id_is_400() {
        let app = app(true).await;

        let (status, body) = send(&app, "GET", "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid user ID");
    }

    #[tokio::test]
    async fn get_absent_id_is_404() {
        let app = app(true).await;

        let (status, body) = send(&app, "GET", "/users/999999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn create_with_missing_field_is_400() {
        let app = app(false).await;

        let (status, body) = send(&app, "POST", "/users", Some(r#"{"name": "X"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error creating resource.");
        assert!(body["error"].as_str().unwrap().contains("email"));

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_400() {
        let app = app(false).await;

        let (status, body) = send(&app, "POST", "/users", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn create_without_content_type_is_400() {
        let app = app(false).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users")
                    .body(Body::from(r#"{"name": "X", "email": "x@x.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_overwrites_user() {
        let app = app(true).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/users/2",
            Some(r#"{"id": 99, "name": "Janet Smith", "email": "janet@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Resource updated successfully.");
        assert_eq!(body["data"]["id"], 2);
        assert_eq!(body["data"]["name"], "Janet Smith");

        let (_, user) = send(&app, "GET", "/users/2", None).await;
        assert_eq!(user["name"], "Janet Smith");
        assert_eq!(user["email"], "janet@example.com");
    }

    #[tokio::test]
    async fn update_absent_id_still_succeeds() {
        let app = app(false).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/users/42",
            Some(r#"{"name": "Ghost", "email": "ghost@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(&app, "GET", "/users/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_bad_id_is_checked_before_body() {
        let app = app(true).await;

        let (status, body) = send(&app, "PUT", "/users/abc", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid user ID.");
    }

    #[tokio::test]
    async fn update_bad_body_is_400() {
        let app = app(true).await;

        let (status, body) = send(&app, "PUT", "/users/1", Some(r#"{"email": 5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Error updating resource.");

        let (_, user) = send(&app, "GET", "/users/1", None).await;
        assert_eq!(user["name"], "John Doe");
    }

    #[tokio::test]
    async fn delete_removes_user() {
        let app = app(true).await;

        let (status, body) = send(&app, "DELETE", "/users/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Resource deleted successfully.");
        assert!(body.get("data").is_none());

        let (status, _) = send(&app, "GET", "/users/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn delete_bad_id_is_400() {
        let app = app(true).await;

        let (status, body) = send(&app, "DELETE", "/users/x1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid user ID.");
    }
}

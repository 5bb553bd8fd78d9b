//! ums-server: user management REST API
//!
//! CRUD endpoints over a single `users` table stored in SQLite.
//! The binary crate (`ums-cli`) opens the pool, runs [`db::initialize`]
//! and hands the pool to [`http::run_server`].

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, initialize, DbError, UserRepo};
pub use http::{build_router, run_server, CorsConfig, ServerConfig, ServerError};
pub use models::{NewUser, User, ValidationError};

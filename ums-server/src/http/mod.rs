//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost:3000 by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::Envelope;
pub use error::{ApiError, WriteError, WriteOp};
pub use server::{build_router, run_server, AppState, CorsConfig, ServerConfig, ServerError};

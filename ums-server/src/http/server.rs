//! Axum server setup
//!
//! Server skeleton with:
//! - CORS matching the original frontend (localhost:3000, credentials)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::UserRepo;

/// Origin of the bundled Next.js frontend in development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// How long browsers may cache a preflight response.
const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS policy
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,

    /// Allow any origin (default: false)
    ///
    /// WARNING: Setting this to true allows any origin and drops
    /// credential support. Only use for development.
    pub permissive: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            permissive: false,
        }
    }
}

impl CorsConfig {
    /// Build the tower-http layer for this policy.
    pub fn layer(&self) -> Result<CorsLayer, ServerError> {
        if self.permissive {
            tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
            return Ok(CorsLayer::permissive());
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(String::as_str)
            .map(parse_origin)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::HEAD,
            ])
            .allow_headers([
                header::ORIGIN,
                header::CONTENT_LENGTH,
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
            ])
            .expose_headers([header::CONTENT_LENGTH])
            .allow_credentials(true)
            .max_age(CORS_MAX_AGE))
    }
}

/// Credentialed CORS cannot use `*`; that case goes through `permissive`.
fn parse_origin(origin: &str) -> Result<HeaderValue, ServerError> {
    if origin == "*" {
        return Err(ServerError::InvalidOrigin {
            origin: origin.to_string(),
            reason: "wildcard origin requires permissive CORS".to_string(),
        });
    }

    HeaderValue::from_str(origin).map_err(|e| ServerError::InvalidOrigin {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepo,
}

/// Build the application router with all routes.
pub fn build_router(users: UserRepo, cors: &CorsConfig) -> Result<Router, ServerError> {
    let state = AppState { users };

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .layer(cors.layer()?)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state));

    Ok(app)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// The pool must already be initialized (see [`crate::db::initialize`]).
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("./users.db")).await?;
/// initialize(&pool, true).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(UserRepo::new(pool), &config.cors)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

//! HTTP server command
//!
//! Prepares the database, then serves the users API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use ums_server::{run_server, CorsConfig, ServerConfig};

use super::{open_database, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "UMS_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Origin allowed by CORS (repeat or comma-separate for several)
    #[arg(
        long = "cors-origin",
        env = "UMS_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors: CorsConfig {
                allowed_origins: self.cors_origins.clone(),
                permissive: self.cors_permissive,
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let (pool, _) = open_database(&args.db).await?;

    tracing::info!("Starting ums server on {}", args.bind);

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

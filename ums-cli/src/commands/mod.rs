//! Subcommand implementations

mod init;
mod serve;

pub use init::{run_init, InitArgs};
pub use serve::{run_serve, ServeArgs};

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ums_server::db::{create_pool, initialize, SeedOutcome, SqlitePool};

/// Database options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "UMS_DATABASE", default_value = "./users.db")]
    pub database: PathBuf,

    /// Do not insert sample users into an empty table
    #[arg(long)]
    pub no_seed: bool,
}

/// Open the database and bring it to a servable state.
///
/// Any error here is fatal: the caller must not serve traffic.
async fn open_database(args: &DatabaseArgs) -> Result<(SqlitePool, Option<SeedOutcome>)> {
    tracing::info!("Opening database at {}", args.database.display());

    let pool = create_pool(&args.database)
        .await
        .with_context(|| format!("Failed to open database {}", args.database.display()))?;

    let outcome = initialize(&pool, !args.no_seed)
        .await
        .context("Failed to initialize database")?;

    Ok((pool, outcome))
}

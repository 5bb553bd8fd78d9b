//! ums CLI - simple user management server
//!
//! Entry point for the `ums` binary:
//! - `serve`: create/seed the database and run the HTTP API
//! - `init`: create/seed the database and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(name = "ums", version, about = "Simple user management REST API")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Create the users table and seed it, then exit
    Init(commands::InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; values may come from the real environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Init(args) => commands::run_init(args).await?,
    }

    Ok(())
}

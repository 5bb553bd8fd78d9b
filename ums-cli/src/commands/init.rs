//! Database setup without serving
//!
//! Creates the schema and seeds an empty table, then exits.

use anyhow::{Context, Result};
use clap::Parser;
use ums_server::db::SeedOutcome;
use ums_server::UserRepo;

use super::{open_database, DatabaseArgs};

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Prepare the database file and report what was done
pub async fn run_init(args: InitArgs) -> Result<()> {
    let (pool, outcome) = open_database(&args.db).await?;

    let total = UserRepo::new(pool.clone())
        .count()
        .await
        .context("Failed to count users")?;
    pool.close().await;

    println!("{}", summary(outcome, total));
    Ok(())
}

fn summary(outcome: Option<SeedOutcome>, total: i64) -> String {
    match outcome {
        Some(SeedOutcome::Seeded { inserted }) => {
            format!("Seeded {} sample users ({} total)", inserted, total)
        }
        Some(SeedOutcome::Skipped { .. }) => {
            format!("Users table already populated ({} users), skipped seeding", total)
        }
        None => format!("Schema ready ({} users), seeding disabled", total),
    }
}

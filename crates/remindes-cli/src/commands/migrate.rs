//! Database migration commands.

use clap::{Args, Subcommand};

use crate::context::Backend;
use crate::output;
use remindes_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database answers
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, backend: &Backend) -> Result<(), AppError> {
    let pool = backend.require_pool()?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            remindes_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if pool.health_check().await? {
                output::print_success("Database is reachable.");
            } else {
                output::print_warning("Database answered unexpectedly.");
            }
        }
    }

    pool.close().await;
    Ok(())
}

//! CLI command definitions and dispatch.

pub mod migrate;
pub mod notifications;
pub mod sweep;
pub mod test_email;

use clap::{Parser, Subcommand};

use crate::context::Backend;
use crate::output::OutputFormat;
use remindes_core::config::AppConfig;
use remindes_core::error::AppError;

/// Remindes — document and subscription expiry reminders
#[derive(Debug, Parser)]
#[command(name = "remindes", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay, loaded from `config/<env>.toml`
    #[arg(short, long, env = "REMINDES_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Use a seeded in-memory store instead of PostgreSQL
    #[arg(long, global = true)]
    pub memory: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Run the expiry sweep once
    Sweep(sweep::SweepArgs),
    /// Inspect and acknowledge a user's notifications
    Notifications(notifications::NotificationArgs),
    /// Send a sample expiry email
    TestEmail(test_email::TestEmailArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config, &self.env)?;
        let backend = Backend::open(&config, self.memory).await?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &backend).await,
            Commands::Sweep(args) => sweep::execute(args, &config, &backend, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &backend, self.format).await
            }
            Commands::TestEmail(args) => test_email::execute(args, &config, &backend).await,
        }
    }
}

/// Helper: load configuration from the base file and environment overlay
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

//! Remindes notification server
//!
//! Wires the stores, mailer and expiry sweep together and runs the sweep
//! on its cron schedule until shut down.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use remindes_core::config::AppConfig;
use remindes_core::error::AppError;
use remindes_database::DatabasePool;
use remindes_database::repositories::{ItemRepository, NotificationRepository, UserRepository};
use remindes_service::{ExpirySweep, SweepPolicy};
use remindes_worker::{CronScheduler, ExpirySweepJob};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("REMINDES_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("REMINDES_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Remindes v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    remindes_database::migration::run_migrations(db.pool()).await?;

    // ── Stores, mailer, sweep ────────────────────────────────────
    let pool = db.pool().clone();
    let users = Arc::new(UserRepository::new(pool.clone()));
    let items = Arc::new(ItemRepository::new(pool.clone()));
    let notifications = Arc::new(NotificationRepository::new(pool));
    let mailer = remindes_mailer::dispatcher_from_config(&config.email)?;

    let sweep = ExpirySweep::new(
        users,
        items,
        notifications,
        mailer,
        SweepPolicy::from_config(&config),
    );
    let sweep_job = Arc::new(ExpirySweepJob::new(sweep));

    // ── Scheduler ────────────────────────────────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new(Arc::clone(&sweep_job)).await?;
        scheduler.register_default_tasks(&config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Worker disabled; expiry sweeps only run on demand");
        None
    };

    if config.worker.run_on_startup {
        tracing::info!("Running expiry sweep on startup");
        if let Err(e) = sweep_job.execute().await {
            tracing::error!("Startup expiry sweep failed: {}", e);
        }
    }

    // ── Graceful shutdown ────────────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping scheduler...");

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("Remindes stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Cron scheduler for the periodic expiry sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use remindes_core::config::worker::WorkerConfig;
use remindes_core::error::AppError;

use crate::jobs::ExpirySweepJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The sweep job triggered on each tick
    sweep_job: Arc<ExpirySweepJob>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(sweep_job: Arc<ExpirySweepJob>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            sweep_job,
        })
    }

    /// Register all scheduled tasks described by the worker configuration
    pub async fn register_default_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register_expiry_sweep(&config.sweep_schedule).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expiry sweep on `schedule` (six fields, seconds first)
    async fn register_expiry_sweep(&self, schedule: &str) -> Result<(), AppError> {
        let sweep_job = Arc::clone(&self.sweep_job);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let sweep_job = Arc::clone(&sweep_job);
            Box::pin(async move {
                tracing::debug!("Running scheduled expiry sweep");
                if let Err(e) = sweep_job.execute().await {
                    tracing::error!("Scheduled expiry sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid expiry sweep schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add expiry_sweep schedule: {}", e))
        })?;

        tracing::info!(schedule, "Registered: expiry_sweep");
        Ok(())
    }
}

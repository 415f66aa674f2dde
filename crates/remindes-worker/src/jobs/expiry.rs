//! Periodic expiry sweep job.

use std::time::Instant;

use tokio::sync::Mutex;
use tracing;

use remindes_core::result::AppResult;
use remindes_service::{ExpirySweep, SweepReport};

/// Runs the expiry sweep, skipping a tick while a previous run is active.
#[derive(Debug)]
pub struct ExpirySweepJob {
    /// The sweep to run
    sweep: ExpirySweep,
    /// Held for the duration of a run
    running: Mutex<()>,
}

impl ExpirySweepJob {
    /// Create a new expiry sweep job
    pub fn new(sweep: ExpirySweep) -> Self {
        Self {
            sweep,
            running: Mutex::new(()),
        }
    }

    /// Run one sweep.
    ///
    /// Returns `Ok(None)` without doing anything when another run holds
    /// the guard.
    pub async fn execute(&self) -> AppResult<Option<SweepReport>> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("Previous expiry sweep still running; skipping this tick");
            return Ok(None);
        };

        let started = Instant::now();
        let report = self.sweep.run().await?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            created = report.notifications_created,
            errors = report.errors,
            "Expiry sweep job completed"
        );
        Ok(Some(report))
    }
}

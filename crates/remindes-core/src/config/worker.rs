//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduler configuration for the periodic expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the expiry sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
    /// Run one sweep immediately when the worker starts.
    #[serde(default)]
    pub run_on_startup: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_schedule: default_sweep_schedule(),
            run_on_startup: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    "0 0 9 * * *".to_string()
}

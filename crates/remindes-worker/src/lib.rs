//! Scheduled background work for Remindes.
//!
//! This crate provides:
//! - A cron scheduler that triggers the expiry sweep on a configured schedule
//! - The sweep job itself, which refuses to overlap with a run in progress

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpirySweepJob;
pub use scheduler::CronScheduler;

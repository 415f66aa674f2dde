//! Expiry evaluation, dedup, persistence, and the sweep orchestrator.

pub mod dedup;
pub mod evaluator;
pub mod message;
pub mod service;
pub mod sweep;
pub mod writer;

pub use dedup::DedupGuard;
pub use evaluator::DueStatus;
pub use service::NotificationService;
pub use sweep::{ExpirySweep, SweepPolicy, SweepReport};
pub use writer::NotificationWriter;

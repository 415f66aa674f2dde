//! # remindes-service
//!
//! The expiry-notification engine: a pure evaluator that classifies
//! items against "today", a dedup guard, a notification writer, the
//! sweep orchestrator tying them together, and the user-facing
//! notification operations.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod notification;

pub use notification::{
    DedupGuard, DueStatus, ExpirySweep, NotificationService, NotificationWriter, SweepPolicy,
    SweepReport,
};

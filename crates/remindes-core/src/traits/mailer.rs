//! Email dispatcher trait consumed by the expiry sweep.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fully rendered outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Optional plain-text alternative.
    pub plain_body: Option<String>,
}

/// Best-effort mail delivery.
///
/// Implementations must never propagate transport failures: every error
/// is logged inside the dispatcher and reported as `false`. Callers treat
/// `false` as "not confirmed delivered" and do not retry.
#[async_trait]
pub trait EmailDispatcher: Send + Sync + std::fmt::Debug + 'static {
    /// Send a message. Returns `true` once the transport accepted it.
    async fn send(&self, message: &EmailMessage) -> bool;
}

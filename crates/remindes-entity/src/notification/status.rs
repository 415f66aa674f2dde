//! Email delivery state of a notification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery state machine: `Pending -> Sent | SendFailed | Skipped`.
///
/// `Sent` is terminal. The sweep never retries a failed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "email_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    /// Created, send not yet attempted.
    Pending,
    /// The transport accepted the message.
    Sent,
    /// The send was attempted and failed.
    SendFailed,
    /// No send was attempted (no address or email opt-out).
    Skipped,
}

impl EmailStatus {
    /// Check whether a transition from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: EmailStatus) -> bool {
        match self {
            Self::Sent => next == Self::Sent,
            Self::Pending | Self::SendFailed | Self::Skipped => true,
        }
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::SendFailed => "send_failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

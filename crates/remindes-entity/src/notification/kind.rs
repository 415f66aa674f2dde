//! Notification kind enumeration and dedup windows.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What condition a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The item is due within its lead window.
    ExpiryWarning,
    /// The item's due date has passed.
    Expired,
}

impl NotificationKind {
    /// How long a notification of this kind suppresses another one for
    /// the same (user, item).
    ///
    /// Warnings repeat roughly daily while the deadline approaches;
    /// expired notices repeat weekly at most. The two windows are
    /// intentionally different.
    pub fn dedup_window(&self) -> Duration {
        match self {
            Self::ExpiryWarning => Duration::days(1),
            Self::Expired => Duration::days(7),
        }
    }

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpiryWarning => "expiry_warning",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

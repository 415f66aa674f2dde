//! User entity model (the subset the expiry engine reads).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use remindes_core::types::UserId;

/// Default lead time in days for new accounts.
pub const DEFAULT_NOTIFICATION_DAYS_BEFORE: i32 = 7;

/// A registered Remindes account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Destination address. Absent for some OAuth-only accounts.
    pub email: Option<String>,
    /// Full name used in email greetings.
    pub full_name: Option<String>,
    /// Whether the user opted in to email notifications.
    pub email_notifications_enabled: bool,
    /// Default lead time in days before an item's due date.
    pub notification_days_before: i32,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with default notification preferences.
    pub fn new(email: Option<String>, full_name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email,
            full_name,
            email_notifications_enabled: true,
            notification_days_before: DEFAULT_NOTIFICATION_DAYS_BEFORE,
            created_at: Utc::now(),
        }
    }

    /// Name used to greet the user in emails.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "User",
        }
    }

    /// The address expiry mail should go to, if the user wants mail at all.
    pub fn deliverable_email(&self) -> Option<&str> {
        if !self.email_notifications_enabled {
            return None;
        }
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

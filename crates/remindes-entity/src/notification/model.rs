//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use remindes_core::types::{ItemId, NotificationId, UserId};

use super::kind::NotificationKind;
use super::status::EmailStatus;

/// A persisted expiry notification.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// The item the notification is about.
    pub item_id: ItemId,
    /// Reported condition.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// Email delivery state.
    pub email_status: EmailStatus,
    /// When the notification was created. Authoritative for dedup.
    pub created_at: DateTime<Utc>,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether the notification was confirmed delivered by email.
    pub fn is_sent_via_email(&self) -> bool {
        self.email_status == EmailStatus::Sent
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: UserId,
    /// The item the notification is about.
    pub item_id: ItemId,
    /// Reported condition.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Creation time, taken from the sweep clock.
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// Materialize the row as freshly inserted: unread, email pending.
    pub fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            item_id: self.item_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            is_read: false,
            email_status: EmailStatus::Pending,
            created_at: self.created_at,
            read_at: None,
        }
    }
}

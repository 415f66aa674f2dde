//! Creates notifications and records their email outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use remindes_core::result::AppResult;
use remindes_core::types::{ItemId, NotificationId, UserId};
use remindes_database::store::NotificationStore;
use remindes_entity::notification::{EmailStatus, NewNotification, Notification, NotificationKind};

/// The only writer of notification rows.
#[derive(Debug, Clone)]
pub struct NotificationWriter {
    store: Arc<dyn NotificationStore>,
}

impl NotificationWriter {
    /// Creates a new notification writer.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Insert an unread notification with email pending.
    pub async fn create(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: NotificationKind,
        title: String,
        message: String,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let notification = self
            .store
            .insert(NewNotification {
                user_id,
                item_id,
                kind,
                title,
                message,
                created_at: now,
            })
            .await?;
        debug!(id = %notification.id, %user_id, %item_id, %kind, "Notification created");
        Ok(notification)
    }

    /// Record a confirmed delivery. Idempotent.
    pub async fn mark_email_sent(&self, id: NotificationId) -> AppResult<()> {
        self.store.update_email_status(id, EmailStatus::Sent).await
    }

    /// Record a failed delivery. Never overrides `sent`.
    pub async fn mark_email_failed(&self, id: NotificationId) -> AppResult<()> {
        self.store
            .update_email_status(id, EmailStatus::SendFailed)
            .await
    }

    /// Record that no delivery was attempted.
    pub async fn mark_email_skipped(&self, id: NotificationId) -> AppResult<()> {
        self.store.update_email_status(id, EmailStatus::Skipped).await
    }

    /// Mark a notification read on behalf of `user_id`.
    ///
    /// Returns `false` both when the notification does not exist and when
    /// it belongs to someone else, so another user's notification looks
    /// the same as a missing one.
    pub async fn mark_read(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let changed = self.store.mark_read(id, user_id, Utc::now()).await?;
        if !changed {
            warn!(notification_id = %id, %user_id, "mark_read matched no notification for caller");
        }
        Ok(changed)
    }

    /// Mark every unread notification of `user_id` read.
    pub async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        self.store.mark_all_read(user_id, Utc::now()).await
    }
}

//! User-facing notification operations.

use std::sync::Arc;

use tracing::info;

use remindes_core::error::AppError;
use remindes_core::types::{NotificationId, UserId};
use remindes_database::store::NotificationStore;
use remindes_entity::notification::Notification;

use super::writer::NotificationWriter;

/// Lists notifications and flips their read state.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store for reads.
    store: Arc<dyn NotificationStore>,
    /// Writer for read-state mutations.
    writer: NotificationWriter,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        let writer = NotificationWriter::new(Arc::clone(&store));
        Self { store, writer }
    }

    /// Lists a user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        user_id: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        self.store.list_for_user(user_id, unread_only).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, user_id: UserId) -> Result<i64, AppError> {
        self.store.count_unread(user_id).await
    }

    /// Marks a notification as read. `false` if the caller does not own it.
    pub async fn mark_read(
        &self,
        notification_id: NotificationId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        self.writer.mark_read(notification_id, user_id).await
    }

    /// Marks all notifications as read for the user.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<u64, AppError> {
        let count = self.writer.mark_all_read(user_id).await?;
        info!(%user_id, count, "Marked notifications read");
        Ok(count)
    }
}

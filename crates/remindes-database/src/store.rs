//! Record-store traits consumed by the notification services.
//!
//! Both the PostgreSQL repositories and [`crate::MemoryStore`]
//! implement these, so services hold `Arc<dyn ...>` handles and never
//! know which backend they talk to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use remindes_core::result::AppResult;
use remindes_core::types::{ItemId, NotificationId, UserId};
use remindes_entity::item::Item;
use remindes_entity::notification::{EmailStatus, NewNotification, Notification, NotificationKind};
use remindes_entity::user::User;

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Users who opted in to email notifications.
    async fn list_with_email_notifications_enabled(&self) -> AppResult<Vec<User>>;

    /// Every user.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;
}

/// Read access to tracked items.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug + 'static {
    /// All items owned by a user, regardless of kind.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Item>>;
}

/// Notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// The most recent notification of `kind` for (user, item) created at
    /// or after `since`.
    async fn find_recent(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Insert a notification (unread, email pending).
    async fn insert(&self, new: NewNotification) -> AppResult<Notification>;

    /// Move the email state forward. A `sent` row is never changed again.
    async fn update_email_status(&self, id: NotificationId, status: EmailStatus) -> AppResult<()>;

    /// Find a notification by primary key.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// A user's notifications, newest first.
    async fn list_for_user(&self, user_id: UserId, unread_only: bool)
    -> AppResult<Vec<Notification>>;

    /// Number of unread notifications for a user.
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark one notification read if it belongs to `user_id`.
    /// Returns `false` when no such notification exists for that user.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Mark every unread notification of a user read. Returns the number
    /// of rows changed.
    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64>;
}

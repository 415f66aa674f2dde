//! In-memory record store backed by `dashmap`.
//!
//! Implements every store trait so the expiry engine can run without
//! PostgreSQL, in unit tests and with `remindes-cli --memory`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use remindes_core::result::AppResult;
use remindes_core::types::{ItemId, NotificationId, UserId};
use remindes_entity::item::Item;
use remindes_entity::notification::{
    EmailStatus, NewNotification, Notification, NotificationKind,
};
use remindes_entity::user::User;

use crate::store::{ItemStore, NotificationStore, UserStore};

/// Shared in-memory tables. Cloning shares the same underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<UserId, User>>,
    items: Arc<DashMap<ItemId, Item>>,
    notifications: Arc<DashMap<NotificationId, Notification>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn put_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Insert or replace an item.
    pub fn put_item(&self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Remove an item, leaving its notifications behind.
    pub fn remove_item(&self, id: ItemId) -> Option<Item> {
        self.items.remove(&id).map(|(_, item)| item)
    }

    /// Every stored notification, oldest first.
    pub fn all_notifications(&self) -> Vec<Notification> {
        let mut all: Vec<Notification> =
            self.notifications.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|n| n.created_at);
        all
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_with_email_notifications_enabled(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|e| e.email_notifications_enabled)
            .map(|e| e.value().clone())
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|i| i.created_at);
        Ok(items)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn find_recent(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| {
                n.user_id == user_id
                    && n.item_id == item_id
                    && n.kind == kind
                    && n.created_at >= since
            })
            .max_by_key(|n| n.created_at)
            .map(|n| n.value().clone()))
    }

    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = new.into_notification(NotificationId::new());
        debug!(id = %notification.id, kind = %notification.kind, "Stored notification in memory");
        self.notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn update_email_status(&self, id: NotificationId, status: EmailStatus) -> AppResult<()> {
        if let Some(mut n) = self.notifications.get_mut(&id) {
            if n.email_status.can_transition_to(status) {
                n.email_status = status;
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|n| n.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
    ) -> AppResult<Vec<Notification>> {
        let mut list: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || n.is_unread()))
            .map(|n| n.value().clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        Ok(self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && n.is_unread())
            .count() as i64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        match self.notifications.get_mut(&id) {
            Some(mut n) if n.user_id == user_id => {
                n.is_read = true;
                n.read_at.get_or_insert(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        let mut changed = 0;
        for mut n in self.notifications.iter_mut() {
            if n.user_id == user_id && !n.is_read {
                n.is_read = true;
                n.read_at = Some(at);
                changed += 1;
            }
        }
        Ok(changed)
    }
}

//! Shared fixtures for sweep tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use dashmap::DashSet;

use remindes_core::error::{AppError, ErrorKind};
use remindes_core::result::AppResult;
use remindes_core::types::{ItemId, NotificationId, UserId};
use remindes_database::{ItemStore, MemoryStore, NotificationStore, UserStore};
use remindes_entity::item::{Item, ItemKind};
use remindes_entity::notification::{
    EmailStatus, NewNotification, Notification, NotificationKind,
};
use remindes_entity::user::User;
use remindes_mailer::NoopDispatcher;
use remindes_service::{ExpirySweep, SweepPolicy};

/// A sweep wired to an in-memory store and a recording dispatcher.
pub struct TestApp {
    /// Backing store, shared with the sweep.
    pub store: MemoryStore,
    /// Failure switches on the store the sweep sees.
    pub faults: FaultyStore,
    /// Dispatcher that records every message.
    pub mailer: Arc<NoopDispatcher>,
    /// The sweep under test.
    pub sweep: ExpirySweep,
}

impl TestApp {
    /// Sweep with default policy and a dispatcher that always succeeds.
    pub fn new() -> Self {
        Self::with(SweepPolicy::default(), true)
    }

    /// Sweep with a custom policy and dispatcher outcome.
    pub fn with(policy: SweepPolicy, delivers: bool) -> Self {
        let store = MemoryStore::new();
        let faults = FaultyStore::new(store.clone());
        let mailer = Arc::new(NoopDispatcher::new(delivers));
        let sweep = ExpirySweep::new(
            Arc::new(faults.clone()),
            Arc::new(faults.clone()),
            Arc::new(faults.clone()),
            mailer.clone(),
            policy,
        );
        Self {
            store,
            faults,
            mailer,
            sweep,
        }
    }

    /// Store an opted-in user with an address.
    pub fn create_user(&self, name: &str) -> User {
        let user = User::new(
            Some(format!("{}@example.com", name.to_lowercase())),
            Some(name.to_string()),
        );
        self.store.put_user(user.clone());
        user
    }

    /// Store a document whose legacy expiration column is `due`.
    pub fn create_document(&self, user: &User, name: &str, due: NaiveDate) -> Item {
        let mut item = Item::new(user.id, name, ItemKind::Document);
        item.expiration_date = Some(due);
        self.store.put_item(item.clone());
        item
    }
}

/// Delegates to a [`MemoryStore`] but fails selected calls with a
/// database error. Clones share the same switches.
#[derive(Debug, Clone, Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    item_listing: Arc<DashSet<UserId>>,
    dedup_lookup: Arc<DashSet<ItemId>>,
    inserts: Arc<DashSet<ItemId>>,
    status_updates: Arc<DashSet<ItemId>>,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Listing this user's items fails.
    pub fn fail_item_listing_for(&self, user: UserId) {
        self.item_listing.insert(user);
    }

    /// Looking up earlier notifications about this item fails.
    pub fn fail_dedup_lookup_for(&self, item: ItemId) {
        self.dedup_lookup.insert(item);
    }

    /// Inserting a notification about this item fails.
    pub fn fail_inserts_for(&self, item: ItemId) {
        self.inserts.insert(item);
    }

    /// Recording the email outcome of a notification about this item fails.
    pub fn fail_status_updates_for(&self, item: ItemId) {
        self.status_updates.insert(item);
    }
}

fn injected(what: &str) -> AppError {
    AppError::new(ErrorKind::Database, format!("injected {what} failure"))
}

#[async_trait]
impl UserStore for FaultyStore {
    async fn list_with_email_notifications_enabled(&self) -> AppResult<Vec<User>> {
        self.inner.list_with_email_notifications_enabled().await
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        self.inner.list_all().await
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        UserStore::find_by_id(&self.inner, id).await
    }
}

#[async_trait]
impl ItemStore for FaultyStore {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        if self.item_listing.contains(&user_id) {
            return Err(injected("item listing"));
        }
        ItemStore::list_for_user(&self.inner, user_id).await
    }
}

#[async_trait]
impl NotificationStore for FaultyStore {
    async fn find_recent(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        if self.dedup_lookup.contains(&item_id) {
            return Err(injected("dedup lookup"));
        }
        self.inner.find_recent(user_id, item_id, kind, since).await
    }

    async fn insert(&self, new: NewNotification) -> AppResult<Notification> {
        if self.inserts.contains(&new.item_id) {
            return Err(injected("insert"));
        }
        self.inner.insert(new).await
    }

    async fn update_email_status(&self, id: NotificationId, status: EmailStatus) -> AppResult<()> {
        let existing = NotificationStore::find_by_id(&self.inner, id).await?;
        if existing.is_some_and(|n| self.status_updates.contains(&n.item_id)) {
            return Err(injected("email status update"));
        }
        self.inner.update_email_status(id, status).await
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        NotificationStore::find_by_id(&self.inner, id).await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
    ) -> AppResult<Vec<Notification>> {
        NotificationStore::list_for_user(&self.inner, user_id, unread_only).await
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        self.inner.count_unread(user_id).await
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.inner.mark_read(id, user_id, at).await
    }

    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        self.inner.mark_all_read(user_id, at).await
    }
}

/// 09:00 UTC on the given day.
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

//! Suppresses repeat notifications inside a kind-specific window.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use remindes_core::result::AppResult;
use remindes_core::types::{ItemId, UserId};
use remindes_database::store::NotificationStore;
use remindes_entity::notification::NotificationKind;

/// Checks whether a (user, item, kind) was already notified recently.
#[derive(Debug, Clone)]
pub struct DedupGuard {
    store: Arc<dyn NotificationStore>,
}

impl DedupGuard {
    /// Creates a new dedup guard.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// `true` when a notification of `kind` for this user and item was
    /// created within [`NotificationKind::dedup_window`] before `now`.
    pub async fn already_notified(
        &self,
        user_id: UserId,
        item_id: ItemId,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let since = now - kind.dedup_window();
        let recent = self
            .store
            .find_recent(user_id, item_id, kind, since)
            .await?;
        Ok(recent.is_some())
    }
}

//! Item entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use remindes_core::types::{ItemId, UserId};

use super::kind::ItemKind;

/// A document or subscription tracked by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Kind discriminator.
    pub kind: ItemKind,
    /// Legacy due-date column for documents.
    pub expiration_date: Option<NaiveDate>,
    /// Legacy due-date column for subscriptions.
    pub renewal_date: Option<NaiveDate>,
    /// Per-item lead time override in days.
    pub reminder_days_before: Option<i32>,
    /// User-extensible attributes (JSON object).
    pub dynamic_fields: Option<serde_json::Value>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create an item with no dates set.
    pub fn new(user_id: UserId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            user_id,
            name: name.into(),
            kind,
            expiration_date: None,
            renewal_date: None,
            reminder_days_before: None,
            dynamic_fields: None,
            created_at: Utc::now(),
        }
    }

    /// The kind-specific legacy due date.
    pub fn legacy_due_date(&self) -> Option<NaiveDate> {
        match self.kind {
            ItemKind::Document => self.expiration_date,
            ItemKind::Subscription => self.renewal_date,
            ItemKind::Other => None,
        }
    }

    /// Look up a string attribute in the dynamic field map.
    pub fn dynamic_str(&self, key: &str) -> Option<&str> {
        self.dynamic_fields
            .as_ref()
            .and_then(|fields| fields.get(key))
            .and_then(|v| v.as_str())
    }
}

//! Item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use remindes_core::error::{AppError, ErrorKind};
use remindes_core::result::AppResult;
use remindes_core::types::UserId;
use remindes_entity::item::Item;

use crate::store::ItemStore;

/// Repository for item queries.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT id, user_id, name, kind, expiration_date, renewal_date, \
             reminder_days_before, dynamic_fields, created_at \
             FROM items WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items for user", e))
    }
}

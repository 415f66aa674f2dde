//! Store and dispatcher wiring shared by CLI commands.

use std::sync::Arc;

use chrono::{Duration, Utc};

use remindes_core::config::AppConfig;
use remindes_core::error::AppError;
use remindes_core::traits::EmailDispatcher;
use remindes_database::repositories::{ItemRepository, NotificationRepository, UserRepository};
use remindes_database::{DatabasePool, ItemStore, MemoryStore, NotificationStore, UserStore};
use remindes_entity::item::{Item, ItemKind};
use remindes_entity::user::User;
use remindes_mailer::NoopDispatcher;
use remindes_service::{ExpirySweep, NotificationService, SweepPolicy};

/// Record stores and mail transport for one CLI invocation.
pub struct Backend {
    /// User accounts
    pub users: Arc<dyn UserStore>,
    /// Tracked items
    pub items: Arc<dyn ItemStore>,
    /// Notifications
    pub notifications: Arc<dyn NotificationStore>,
    /// Outgoing mail
    pub mailer: Arc<dyn EmailDispatcher>,
    /// Set when backed by PostgreSQL
    pub pool: Option<DatabasePool>,
}

impl Backend {
    /// Connect to PostgreSQL and the configured mail transport.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = DatabasePool::connect(&config.database).await?;
        let pg = pool.pool().clone();
        Ok(Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            items: Arc::new(ItemRepository::new(pg.clone())),
            notifications: Arc::new(NotificationRepository::new(pg)),
            mailer: remindes_mailer::dispatcher_from_config(&config.email)?,
            pool: Some(pool),
        })
    }

    /// An in-memory backend seeded with a demo account.
    ///
    /// Mail is never delivered; the no-op dispatcher reports success.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        seed_demo(&store);
        Self {
            users: Arc::new(store.clone()),
            items: Arc::new(store.clone()),
            notifications: Arc::new(store),
            mailer: Arc::new(NoopDispatcher::new(true)),
            pool: None,
        }
    }

    /// Pick the backend selected on the command line.
    pub async fn open(config: &AppConfig, memory: bool) -> Result<Self, AppError> {
        if memory {
            Ok(Self::in_memory())
        } else {
            Self::connect(config).await
        }
    }

    /// The expiry sweep over this backend.
    pub fn sweep(&self, config: &AppConfig) -> ExpirySweep {
        ExpirySweep::new(
            Arc::clone(&self.users),
            Arc::clone(&self.items),
            Arc::clone(&self.notifications),
            Arc::clone(&self.mailer),
            SweepPolicy::from_config(config),
        )
    }

    /// User-facing notification operations over this backend.
    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(Arc::clone(&self.notifications))
    }

    /// The PostgreSQL pool, or an error in memory mode.
    pub fn require_pool(&self) -> Result<&DatabasePool, AppError> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::validation("This command needs a database; drop --memory"))
    }
}

/// One opted-in user with a document due soon, an expired subscription
/// and an undated item.
fn seed_demo(store: &MemoryStore) {
    let today = Utc::now().date_naive();
    let user = User::new(
        Some("demo@remindes.local".to_string()),
        Some("Demo User".to_string()),
    );

    let mut passport = Item::new(user.id, "Passport", ItemKind::Document);
    passport.expiration_date = Some(today + Duration::days(5));

    let mut streaming = Item::new(user.id, "Streaming plan", ItemKind::Subscription);
    streaming.renewal_date = Some(today - Duration::days(3));

    let warranty = Item::new(user.id, "Laptop warranty", ItemKind::Other);

    tracing::info!(user_id = %user.id, "Seeded in-memory demo account");
    store.put_user(user);
    store.put_item(passport);
    store.put_item(streaming);
    store.put_item(warranty);
}

//! PostgreSQL repository implementations of the store traits.

pub mod item;
pub mod notification;
pub mod user;

pub use item::ItemRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;

//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::NotificationKind;
pub use model::{NewNotification, Notification};
pub use status::EmailStatus;

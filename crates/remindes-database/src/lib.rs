//! # remindes-database
//!
//! Record-store access for Remindes: the store traits the expiry engine
//! consumes, PostgreSQL connection management and repositories, and an
//! in-memory store for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ItemStore, NotificationStore, UserStore};

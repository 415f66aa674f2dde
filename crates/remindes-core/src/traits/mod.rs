//! Core traits defined in `remindes-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{EmailDispatcher, EmailMessage};

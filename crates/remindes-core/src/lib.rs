//! # remindes-core
//!
//! Core crate for Remindes. Contains configuration schemas, typed
//! identifiers, the collaborator traits consumed by the expiry engine,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Remindes crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

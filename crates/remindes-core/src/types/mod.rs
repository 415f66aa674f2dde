//! Core type definitions used across the Remindes workspace.

pub mod id;

pub use id::*;

//! Tracked item entities.

pub mod kind;
pub mod model;

pub use kind::ItemKind;
pub use model::Item;

//! Item kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator deciding which legacy column carries an item's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An identity or legal document with an expiration date.
    Document,
    /// A recurring subscription with a renewal date.
    Subscription,
    /// Anything else. Only dynamic attributes can give it a due date.
    Other,
}

impl ItemKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Subscription => "subscription",
            Self::Other => "other",
        }
    }

    /// Noun used in notification messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Subscription => "subscription",
            Self::Other => "item",
        }
    }

    /// Capitalized label used in email bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Subscription => "Subscription",
            Self::Other => "Item",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

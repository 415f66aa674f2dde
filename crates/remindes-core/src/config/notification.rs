//! Expiry notification policy.

use serde::{Deserialize, Serialize};

/// Policy knobs for the expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Only scan users who opted in to email notifications.
    ///
    /// When `true` (the default), a user who disables email notifications
    /// also stops receiving in-app expiry notifications. Set to `false`
    /// to scan every user; email is then still restricted to opted-in
    /// users with an address.
    #[serde(default = "default_true")]
    pub scan_requires_email_opt_in: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            scan_requires_email_opt_in: true,
        }
    }
}

fn default_true() -> bool {
    true
}

//! Outgoing mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay settings used by the email dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether outgoing mail is enabled. When disabled a no-op
    /// dispatcher is used and every send reports failure.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Optional SMTP username. Relays that authenticate by IP leave this unset.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional SMTP password.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Sender address for notification mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender addresses the relay accepts.
    #[serde(default = "default_allowed_senders")]
    pub allowed_senders: Vec<String>,
    /// Base URL of the web frontend, used for links in mail bodies.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Per-message send timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: default_from_address(),
            from_name: default_from_name(),
            allowed_senders: default_allowed_senders(),
            frontend_url: default_frontend_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_smtp_host() -> String {
    "smtp-relay.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@remindes.com".to_string()
}

fn default_from_name() -> String {
    "Remindes".to_string()
}

fn default_allowed_senders() -> Vec<String> {
    [
        "support@remindes.com",
        "info@remindes.com",
        "no-reply@remindes.com",
        "billing@remindes.com",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_timeout() -> u64 {
    10
}

//! Dispatcher that never talks to a mail server.

use std::sync::Mutex;

use async_trait::async_trait;

use remindes_core::traits::{EmailDispatcher, EmailMessage};

/// Logs each message and reports a fixed outcome.
///
/// Also records what it was asked to send, which makes it the dispatcher
/// of choice in tests.
#[derive(Debug)]
pub struct NoopDispatcher {
    outcome: bool,
    sent: Mutex<Vec<EmailMessage>>,
}

impl NoopDispatcher {
    /// Create a dispatcher whose `send` always returns `outcome`.
    pub fn new(outcome: bool) -> Self {
        Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages passed to `send` so far.
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailDispatcher for NoopDispatcher {
    async fn send(&self, message: &EmailMessage) -> bool {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            outcome = self.outcome,
            "Email not sent (no-op dispatcher)"
        );
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(message.clone());
        }
        self.outcome
    }
}

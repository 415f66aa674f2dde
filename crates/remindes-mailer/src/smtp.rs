//! SMTP relay dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use remindes_core::config::email::EmailConfig;
use remindes_core::error::{AppError, ErrorKind};
use remindes_core::result::AppResult;
use remindes_core::traits::{EmailDispatcher, EmailMessage};

/// Sends mail through a STARTTLS relay.
#[derive(Debug, Clone)]
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Option<Mailbox>,
    timeout: Duration,
}

impl SmtpDispatcher {
    /// Build the transport from configuration.
    ///
    /// A sender address outside `allowed_senders` does not fail
    /// construction; every send is then refused and logged.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Invalid SMTP relay host", e)
            })?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = sender_mailbox(config);
        if from.is_none() {
            tracing::error!(
                from = %config.from_address,
                allowed = ?config.allowed_senders,
                "Sender address is not an allowed relay alias; email delivery disabled"
            );
        }

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP dispatcher configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    fn build_message(&self, from: Mailbox, message: &EmailMessage) -> AppResult<Message> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Invalid recipient address", e)
        })?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone());

        let html = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone());

        let built = match &message.plain_body {
            Some(plain) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(plain.clone()),
                    )
                    .singlepart(html),
            ),
            None => builder.singlepart(html),
        };

        built.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to build email", e)
        })
    }
}

#[async_trait]
impl EmailDispatcher for SmtpDispatcher {
    async fn send(&self, message: &EmailMessage) -> bool {
        let Some(from) = self.from.clone() else {
            tracing::error!(to = %message.to, "Refusing to send: sender address not allowed");
            return false;
        };

        let email = match self.build_message(from, message) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(to = %message.to, error = %e, "Failed to build email");
                return false;
            }
        };

        match tokio::time::timeout(self.timeout, self.transport.send(email)).await {
            Ok(Ok(_)) => {
                tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
                true
            }
            Ok(Err(e)) => {
                tracing::error!(to = %message.to, error = %e, "Failed to send email");
                false
            }
            Err(_) => {
                tracing::error!(
                    to = %message.to,
                    timeout_secs = self.timeout.as_secs(),
                    "Timed out sending email"
                );
                false
            }
        }
    }
}

/// The configured sender, if it is an allowed alias and parses.
fn sender_mailbox(config: &EmailConfig) -> Option<Mailbox> {
    let allowed = config
        .allowed_senders
        .iter()
        .any(|a| a.eq_ignore_ascii_case(&config.from_address));
    if !allowed {
        return None;
    }
    format!("{} <{}>", config.from_name, config.from_address)
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_must_be_allowed() {
        let mut config = EmailConfig::default();
        assert!(sender_mailbox(&config).is_some());

        config.from_address = "someone@elsewhere.com".into();
        assert!(sender_mailbox(&config).is_none());
    }

    #[tokio::test]
    async fn test_disallowed_sender_reports_failure() {
        let config = EmailConfig {
            from_address: "spoof@elsewhere.com".into(),
            ..EmailConfig::default()
        };
        let dispatcher = SmtpDispatcher::new(&config).expect("transport builds");
        let sent = dispatcher
            .send(&EmailMessage {
                to: "user@example.com".into(),
                subject: "hi".into(),
                html_body: "<p>hi</p>".into(),
                plain_body: None,
            })
            .await;
        assert!(!sent);
    }

    #[tokio::test]
    async fn test_invalid_recipient_reports_failure() {
        let dispatcher = SmtpDispatcher::new(&EmailConfig::default()).expect("transport builds");
        let sent = dispatcher
            .send(&EmailMessage {
                to: "not an address".into(),
                subject: "hi".into(),
                html_body: "<p>hi</p>".into(),
                plain_body: Some("hi".into()),
            })
            .await;
        assert!(!sent);
    }
}

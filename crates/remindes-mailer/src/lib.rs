//! # remindes-mailer
//!
//! Email delivery for Remindes: an SMTP relay dispatcher built on
//! `lettre`, a no-op dispatcher for development, and the expiry mail
//! templates.

pub mod noop;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use remindes_core::config::email::EmailConfig;
use remindes_core::result::AppResult;
use remindes_core::traits::EmailDispatcher;

pub use noop::NoopDispatcher;
pub use smtp::SmtpDispatcher;
pub use templates::{ExpiryNotice, NoticeKind, RenderedEmail};

/// Build the dispatcher selected by configuration.
pub fn dispatcher_from_config(config: &EmailConfig) -> AppResult<Arc<dyn EmailDispatcher>> {
    if config.enabled {
        Ok(Arc::new(SmtpDispatcher::new(config)?))
    } else {
        tracing::warn!("Outgoing email disabled; notification mail will not be delivered");
        Ok(Arc::new(NoopDispatcher::new(false)))
    }
}

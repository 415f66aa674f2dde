//! The expiry sweep: scan users, evaluate their items, notify.
//!
//! A sweep is strictly sequential. Per-item persistence failures are
//! logged and counted; they never abort the remaining work. Only a
//! failure to list the candidate users is returned as an error.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use remindes_core::config::AppConfig;
use remindes_core::result::AppResult;
use remindes_core::traits::{EmailDispatcher, EmailMessage};
use remindes_database::store::{ItemStore, NotificationStore, UserStore};
use remindes_entity::item::Item;
use remindes_entity::notification::{Notification, NotificationKind};
use remindes_entity::user::User;
use remindes_mailer::templates::{ExpiryNotice, NoticeKind};

use super::dedup::DedupGuard;
use super::evaluator::{self, DueStatus};
use super::message;
use super::writer::NotificationWriter;

/// Knobs that change who is scanned and how mail links are built.
#[derive(Debug, Clone)]
pub struct SweepPolicy {
    /// Only scan users that opted in to email notifications.
    pub scan_requires_email_opt_in: bool,
    /// Base URL for dashboard and settings links in mail.
    pub frontend_url: String,
}

impl SweepPolicy {
    /// Build the policy from application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            scan_requires_email_opt_in: config.notifications.scan_requires_email_opt_in,
            frontend_url: config.email.frontend_url.clone(),
        }
    }
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            scan_requires_email_opt_in: true,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

/// Counters describing one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Candidate users whose items were listed.
    pub users_scanned: u64,
    /// Items with a resolvable due date.
    pub items_evaluated: u64,
    /// Notifications inserted.
    pub notifications_created: u64,
    /// Emails the dispatcher accepted.
    pub emails_sent: u64,
    /// Emails the dispatcher rejected.
    pub emails_failed: u64,
    /// Store failures that were logged and skipped.
    pub errors: u64,
}

/// Which notice an item warrants, with its day count.
#[derive(Debug, Clone, Copy)]
struct Trigger {
    kind: NotificationKind,
    days: i64,
}

impl Trigger {
    fn from_status(status: DueStatus) -> Option<Self> {
        match status {
            DueStatus::DueSoon { days_until } => Some(Self {
                kind: NotificationKind::ExpiryWarning,
                days: days_until,
            }),
            DueStatus::Overdue { days_overdue } => Some(Self {
                kind: NotificationKind::Expired,
                days: days_overdue,
            }),
            DueStatus::NotDue => None,
        }
    }

    fn notice_kind(self) -> NoticeKind {
        match self.kind {
            NotificationKind::ExpiryWarning => NoticeKind::ExpiringSoon,
            NotificationKind::Expired => NoticeKind::Expired,
        }
    }
}

/// Orchestrates evaluation, dedup, persistence and delivery.
#[derive(Debug, Clone)]
pub struct ExpirySweep {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
    dedup: DedupGuard,
    writer: NotificationWriter,
    mailer: Arc<dyn EmailDispatcher>,
    policy: SweepPolicy,
}

impl ExpirySweep {
    /// Creates a new expiry sweep.
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        notifications: Arc<dyn NotificationStore>,
        mailer: Arc<dyn EmailDispatcher>,
        policy: SweepPolicy,
    ) -> Self {
        Self {
            users,
            items,
            dedup: DedupGuard::new(Arc::clone(&notifications)),
            writer: NotificationWriter::new(notifications),
            mailer,
            policy,
        }
    }

    /// Run a sweep against the current time.
    pub async fn run(&self) -> AppResult<SweepReport> {
        self.run_at(Utc::now()).await
    }

    /// Run a sweep as if the clock read `now`.
    ///
    /// "Today" is the UTC date of `now`; dedup windows and notification
    /// timestamps are measured from `now` as well.
    pub async fn run_at(&self, now: DateTime<Utc>) -> AppResult<SweepReport> {
        let today = now.date_naive();
        let users = if self.policy.scan_requires_email_opt_in {
            self.users.list_with_email_notifications_enabled().await?
        } else {
            self.users.list_all().await?
        };

        info!(
            candidates = users.len(),
            %today,
            opt_in_only = self.policy.scan_requires_email_opt_in,
            "Starting expiry sweep"
        );

        let mut report = SweepReport::default();
        for user in &users {
            let items = match self.items.list_for_user(user.id).await {
                Ok(items) => items,
                Err(e) => {
                    error!(user_id = %user.id, error = %e, "Failed to list items; skipping user");
                    report.errors += 1;
                    continue;
                }
            };
            report.users_scanned += 1;

            for item in &items {
                self.process_item(user, item, today, now, &mut report).await;
            }
        }

        info!(
            users = report.users_scanned,
            items = report.items_evaluated,
            created = report.notifications_created,
            emails_sent = report.emails_sent,
            emails_failed = report.emails_failed,
            errors = report.errors,
            "Expiry sweep finished"
        );
        Ok(report)
    }

    async fn process_item(
        &self,
        user: &User,
        item: &Item,
        today: NaiveDate,
        now: DateTime<Utc>,
        report: &mut SweepReport,
    ) {
        let Some((due, status)) = evaluator::evaluate(item, user, today) else {
            return;
        };
        report.items_evaluated += 1;

        let Some(trigger) = Trigger::from_status(status) else {
            return;
        };

        match self
            .dedup
            .already_notified(user.id, item.id, trigger.kind, now)
            .await
        {
            Ok(true) => {
                debug!(item_id = %item.id, kind = %trigger.kind, "Recently notified; skipping");
                return;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "Dedup lookup failed; skipping item");
                report.errors += 1;
                return;
            }
        }

        let (title, body) =
            message::compose(trigger.kind, &item.name, item.kind.noun(), trigger.days);
        let notification = match self
            .writer
            .create(user.id, item.id, trigger.kind, title, body, now)
            .await
        {
            Ok(n) => n,
            Err(e) => {
                error!(
                    user_id = %user.id,
                    item_id = %item.id,
                    kind = %trigger.kind,
                    error = %e,
                    "Failed to create notification"
                );
                report.errors += 1;
                return;
            }
        };
        report.notifications_created += 1;

        self.deliver(user, item, due, trigger, &notification, report)
            .await;
    }

    async fn deliver(
        &self,
        user: &User,
        item: &Item,
        due: NaiveDate,
        trigger: Trigger,
        notification: &Notification,
        report: &mut SweepReport,
    ) {
        let Some(address) = user.deliverable_email() else {
            if let Err(e) = self.writer.mark_email_skipped(notification.id).await {
                warn!(
                    notification_id = %notification.id,
                    error = %e,
                    "Failed to record skipped email"
                );
                report.errors += 1;
            }
            return;
        };

        let rendered = ExpiryNotice {
            kind: trigger.notice_kind(),
            user_name: user.display_name(),
            item_name: &item.name,
            item_label: item.kind.label(),
            due_date: due,
            days: trigger.days,
        }
        .render(&self.policy.frontend_url);

        let delivered = self
            .mailer
            .send(&EmailMessage {
                to: address.to_string(),
                subject: rendered.subject,
                html_body: rendered.html,
                plain_body: Some(rendered.plain),
            })
            .await;

        let recorded = if delivered {
            report.emails_sent += 1;
            self.writer.mark_email_sent(notification.id).await
        } else {
            report.emails_failed += 1;
            self.writer.mark_email_failed(notification.id).await
        };
        if let Err(e) = recorded {
            warn!(
                notification_id = %notification.id,
                delivered,
                error = %e,
                "Failed to record email outcome"
            );
            report.errors += 1;
        }
    }

    /// Send a sample expiry warning for a fictitious document to `user`.
    ///
    /// Nothing is persisted. Returns `false` when the user has no
    /// deliverable address or the dispatcher rejects the message.
    pub async fn send_test_email(&self, user: &User) -> bool {
        let Some(address) = user.deliverable_email() else {
            warn!(
                user_id = %user.id,
                "Test email requested for user without a deliverable address"
            );
            return false;
        };

        let days = 3;
        let rendered = ExpiryNotice {
            kind: NoticeKind::ExpiringSoon,
            user_name: user.display_name(),
            item_name: "Test Document",
            item_label: "Document",
            due_date: (Utc::now() + Duration::days(days)).date_naive(),
            days,
        }
        .render(&self.policy.frontend_url);

        self.mailer
            .send(&EmailMessage {
                to: address.to_string(),
                subject: rendered.subject,
                html_body: rendered.html,
                plain_body: Some(rendered.plain),
            })
            .await
    }
}

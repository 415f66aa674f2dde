//! Manual expiry sweep.

use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::context::Backend;
use crate::output::{self, OutputFormat};
use remindes_core::config::AppConfig;
use remindes_core::error::AppError;
use remindes_database::{NotificationStore, UserStore};
use remindes_entity::notification::Notification;

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Created notification row for table output
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct NotificationRow {
    /// Notification ID
    id: String,
    /// Kind
    kind: String,
    /// Title
    title: String,
    /// Read
    read: bool,
    /// Email delivery
    email: String,
    /// Created at
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: n.kind.to_string(),
            title: n.title.clone(),
            read: n.is_read,
            email: n.email_status.to_string(),
            created_at: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute the sweep command
pub async fn execute(
    args: &SweepArgs,
    config: &AppConfig,
    backend: &Backend,
    format: OutputFormat,
) -> Result<(), AppError> {
    let sweep = backend.sweep(config);
    let now = match args.today {
        Some(day) => day.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let report = sweep.run_at(now).await?;

    output::print_summary(
        &report,
        &[
            ("Users scanned", report.users_scanned.to_string()),
            ("Items evaluated", report.items_evaluated.to_string()),
            ("Notifications created", report.notifications_created.to_string()),
            ("Emails sent", report.emails_sent.to_string()),
            ("Emails failed", report.emails_failed.to_string()),
            ("Errors", report.errors.to_string()),
        ],
        format,
    );

    if format == OutputFormat::Table {
        if backend.pool.is_none() {
            let mut created = Vec::new();
            for user in backend.users.list_all().await? {
                created.extend(backend.notifications.list_for_user(user.id, false).await?);
            }
            let rows: Vec<NotificationRow> = created.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);
        }
        output::print_success(&format!(
            "Sweep created {} notification(s)",
            report.notifications_created
        ));
    }
    Ok(())
}

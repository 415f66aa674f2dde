//! Notification inspection and acknowledgement commands.

use clap::{Args, Subcommand};

use super::sweep::NotificationRow;
use crate::context::Backend;
use crate::output::{self, OutputFormat};
use remindes_core::error::AppError;
use remindes_core::types::{NotificationId, UserId};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List a user's notifications, newest first
    List {
        /// Owning user ID
        user: UserId,
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Count a user's unread notifications
    Unread {
        /// Owning user ID
        user: UserId,
    },
    /// Mark one notification read
    MarkRead {
        /// Owning user ID
        user: UserId,
        /// Notification ID
        id: NotificationId,
    },
    /// Mark every unread notification of a user read
    MarkAllRead {
        /// Owning user ID
        user: UserId,
    },
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    backend: &Backend,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = backend.notification_service();

    match &args.command {
        NotificationCommand::List { user, unread } => {
            let notifications = service.list_notifications(*user, *unread).await?;
            let rows: Vec<NotificationRow> =
                notifications.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, format);
        }
        NotificationCommand::Unread { user } => {
            let count = service.unread_count(*user).await?;
            output::print_kv("Unread", &count.to_string());
        }
        NotificationCommand::MarkRead { user, id } => {
            if service.mark_read(*id, *user).await? {
                output::print_success(&format!("Notification {} marked read", id));
            } else {
                return Err(AppError::not_found(format!(
                    "Notification {} not found for user {}",
                    id, user
                )));
            }
        }
        NotificationCommand::MarkAllRead { user } => {
            let changed = service.mark_all_read(*user).await?;
            output::print_success(&format!("{} notification(s) marked read", changed));
        }
    }

    Ok(())
}

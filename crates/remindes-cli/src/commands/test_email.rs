//! Sample expiry email.

use clap::Args;

use crate::context::Backend;
use crate::output;
use remindes_core::config::AppConfig;
use remindes_core::error::AppError;
use remindes_core::types::UserId;
use remindes_database::UserStore;
use remindes_entity::user::User;

/// Arguments for the test-email command
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TestEmailArgs {
    /// Send to this user's address, greeting them by name
    #[arg(long)]
    pub user: Option<UserId>,
    /// Send to an arbitrary address
    #[arg(long)]
    pub to: Option<String>,
}

/// Execute the test-email command
pub async fn execute(
    args: &TestEmailArgs,
    config: &AppConfig,
    backend: &Backend,
) -> Result<(), AppError> {
    let recipient = match (&args.user, &args.to) {
        (Some(id), _) => backend
            .users
            .find_by_id(*id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?,
        (None, Some(address)) => User::new(Some(address.clone()), None),
        (None, None) => return Err(AppError::validation("Pass --user or --to")),
    };

    if backend.sweep(config).send_test_email(&recipient).await {
        output::print_success("Test email sent");
        Ok(())
    } else {
        Err(AppError::external(
            "Test email was not delivered; check the SMTP settings and the recipient's preferences",
        ))
    }
}

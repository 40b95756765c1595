//! API account management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use validator::Validate;

use apikit_auth::PasswordHasher;
use apikit_auth::secret::generate_access_token;
use apikit_core::error::AppError;
use apikit_core::traits::{NotificationType, Notifier};
use apikit_core::types::Account;
use apikit_core::validation::notify_validation_errors;

use crate::context::CommandContext;
use crate::output;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all API accounts
    List,
    /// Create an API account with a fresh access token
    Add {
        /// Login email
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
        /// Use this access token instead of generating one
        #[arg(long)]
        token: Option<String>,
    },
    /// Replace an account's access token
    RotateToken {
        /// Login email
        email: String,
    },
}

/// Input for a new account.
#[derive(Debug, Validate)]
struct NewAccount {
    #[validate(email)]
    email: String,
    #[validate(length(min = 8))]
    password: String,
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    /// Email
    email: String,
    /// Access token
    access_token: String,
    /// Created at
    created_at: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            access_token: account.access_token.clone().unwrap_or_default(),
            created_at: account.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, ctx: &CommandContext) -> Result<(), AppError> {
    let store = ctx.account_store().await?;

    match &args.command {
        UserCommand::List => {
            let rows: Vec<AccountRow> = store.list().await?.iter().map(AccountRow::from).collect();
            output::print_list(&rows, ctx.format);
        }
        UserCommand::Add {
            email,
            password,
            token,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            let input = NewAccount {
                email: email.trim().to_string(),
                password,
            };
            if let Err(errors) = input.validate() {
                notify_validation_errors(&errors, &ctx.notifications);
                return Err(AppError::validation("Account details are invalid"));
            }

            let hash = PasswordHasher::new().hash_password(&input.password)?;
            let token = token
                .clone()
                .unwrap_or_else(|| generate_access_token(&ctx.config.security));
            let account = store
                .create(&Account::new(&input.email, hash).with_access_token(token))
                .await?;

            ctx.log.write(&format!("Created API account {}", account.email));
            ctx.notifications.add(
                &format!("Account '{}' created", account.email),
                NotificationType::Success,
            );
            output::print_item(&AccountRow::from(&account), ctx.format);
        }
        UserCommand::RotateToken { email } => {
            let token = generate_access_token(&ctx.config.security);
            if !store.update_access_token(email, &token).await? {
                return Err(AppError::not_found(format!("Account '{email}' not found")));
            }

            ctx.log.write(&format!("Rotated access token for {email}"));
            ctx.notifications.add(
                &format!("Access token for '{email}' rotated"),
                NotificationType::Success,
            );
            output::print_kv("access_token", &token);
        }
    }

    Ok(())
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

#[cfg(test)]
mod tests {
    use apikit_core::notifications::Notifications;

    use super::*;

    #[test]
    fn test_new_account_validation_messages() {
        let input = NewAccount {
            email: "nobody".into(),
            password: "short".into(),
        };
        let notifications = Notifications::new();
        let errors = input.validate().unwrap_err();

        assert_eq!(notify_validation_errors(&errors, &notifications), 2);
        assert_eq!(
            notifications.take(NotificationType::Error).unwrap(),
            vec![
                "Email must be a valid email address.".to_string(),
                "Password must be at least 8 characters.".to_string(),
            ]
        );
    }

    #[test]
    fn test_new_account_accepts_valid_input() {
        let input = NewAccount {
            email: "dev@example.com".into(),
            password: "correct horse".into(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_account_row_without_token() {
        let account = Account::new("dev@example.com", "hash");
        let row = AccountRow::from(&account);
        assert_eq!(row.email, "dev@example.com");
        assert!(row.access_token.is_empty());
    }
}

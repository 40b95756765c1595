//! Database migration management commands.

use clap::{Args, Subcommand};

use apikit_core::config::DatabaseDriver;
use apikit_core::error::AppError;
use apikit_database::DatabasePool;
use apikit_database::connection::postgres_dsn;

use crate::context::CommandContext;
use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, ctx: &CommandContext) -> Result<(), AppError> {
    if ctx.config.database.driver != DatabaseDriver::Postgres {
        return Err(AppError::configuration(
            "Migrations require database.driver = \"postgres\"",
        ));
    }

    let target = postgres_dsn(&ctx.config.database.url)?.driver_dsn();

    match &args.command {
        MigrateCommand::Run { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Apply pending migrations to {target}?"))
                    .default(true)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            println!("Running database migrations...");
            let pool = DatabasePool::connect(&ctx.config.database).await?;
            pool.migrate().await?;
            pool.close().await;
            ctx.log.write(&format!("Applied database migrations to {target}"));
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}

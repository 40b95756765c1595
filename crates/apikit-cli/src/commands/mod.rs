//! CLI command definitions and dispatch.

pub mod dsn;
pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use apikit_core::config::AppConfig;
use apikit_core::error::AppError;

use crate::context::CommandContext;
use crate::output::OutputFormat;

/// apikit: JSON API toolkit administration
#[derive(Debug, Parser)]
#[command(name = "apikit", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (overrides --env)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment whose `config/{env}.toml` is merged over the defaults
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// API account management
    User(user::UserArgs),
    /// Inspect a database DSN
    Dsn(dsn::DsnArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        if let Commands::Dsn(args) = &self.command {
            return dsn::execute(args, self.format);
        }

        let ctx = CommandContext::new(self.load_config()?, self.format);
        let result = match &self.command {
            Commands::Serve(args) => serve::execute(args, ctx.config.clone()).await,
            Commands::Migrate(args) => migrate::execute(args, &ctx).await,
            Commands::User(args) => user::execute(args, &ctx).await,
            Commands::Dsn(_) => Ok(()),
        };
        ctx.flush();
        result
    }

    /// Load configuration from `--config` or the `--env` layered files.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(&self.env),
        }
    }
}

//! Opens the account store selected by `database.driver`.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use apikit_core::config::{DatabaseConfig, DatabaseDriver};
use apikit_core::error::{AppError, ErrorKind};
use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;

use crate::dsn::DsnParts;
use crate::repositories::{AccountRepository, MemoryAccountStore};

const POSTGRES_SCHEMES: [&str; 2] = ["postgres", "postgresql"];

/// Pooled PostgreSQL connections for the account tables.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using `database.url`, which must be a `postgres://` DSN.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let dsn = postgres_dsn(&config.url)?;
        info!(
            target = %dsn.driver_dsn(),
            user = %dsn.user,
            pool_size = config.max_connections,
            "Opening account database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach account database {}", dsn.driver_dsn()),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Apply the bundled `migrations/` to this database.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Account table migration failed: {e}"),
                    e,
                )
            })?;
        info!("Account tables are up to date");
        Ok(())
    }

    /// Hand the pool to a repository.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parse `url` and require a PostgreSQL scheme.
pub fn postgres_dsn(url: &str) -> AppResult<DsnParts> {
    let dsn = DsnParts::parse(url)?;
    if !POSTGRES_SCHEMES.contains(&dsn.driver.as_str()) {
        return Err(AppError::configuration(format!(
            "database.url must use postgres://, got {}://",
            dsn.driver
        )));
    }
    Ok(dsn)
}

/// Open the account store for `config.driver`.
///
/// The Postgres backend is migrated before it is returned.
pub async fn open_account_store(config: &DatabaseConfig) -> AppResult<Arc<dyn AccountStore>> {
    match config.driver {
        DatabaseDriver::Memory => {
            info!("Using in-memory account store");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
        DatabaseDriver::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            pool.migrate().await?;
            Ok(Arc::new(AccountRepository::new(pool.into_pool())))
        }
    }
}

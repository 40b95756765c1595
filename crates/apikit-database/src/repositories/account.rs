//! PostgreSQL account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use apikit_core::error::{AppError, ErrorKind};
use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;
use apikit_core::types::Account;

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    access_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            access_token: row.access_token,
            created_at: row.created_at,
        }
    }
}

/// Account store backed by the `api_accounts` table.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM api_accounts WHERE access_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Account::from))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by token", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM api_accounts WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Account::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account by email", e))
    }

    async fn create(&self, account: &Account) -> AppResult<Account> {
        sqlx::query_as::<_, AccountRow>(
            r#"INSERT INTO api_accounts (id, email, password_hash, access_token, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *"#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.access_token)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map(Account::from)
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                AppError::validation(format!("Account '{}' already exists", account.email))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create account", e)
            }
        })
    }

    async fn update_access_token(&self, email: &str, token: &str) -> AppResult<bool> {
        sqlx::query("UPDATE api_accounts SET access_token = $2 WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .bind(token)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update access token", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM api_accounts ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Account::from).collect())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }
}

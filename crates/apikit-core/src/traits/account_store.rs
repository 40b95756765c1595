//! Account lookup used by access-token resolution.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::account::Account;

/// Read/write access to API accounts.
///
/// Implementations must wrap backend failures into
/// [`ErrorKind::Database`](crate::error::ErrorKind::Database) errors.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find the account owning the given bearer access token.
    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<Account>>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account and return it.
    async fn create(&self, account: &Account) -> AppResult<Account>;

    /// Replace an account's access token. Returns `false` if no account matched.
    async fn update_access_token(&self, email: &str, token: &str) -> AppResult<bool>;

    /// List all accounts ordered by creation time.
    async fn list(&self) -> AppResult<Vec<Account>>;
}

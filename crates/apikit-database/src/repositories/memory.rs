//! Process-local account store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use apikit_core::error::AppError;
use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;
use apikit_core::types::Account;

/// In-memory account store keyed by lower-cased email.
///
/// Used when `database.driver = "memory"` and by tests.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.access_token.as_deref() == Some(token))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&key(email)).map(|a| a.value().clone()))
    }

    async fn create(&self, account: &Account) -> AppResult<Account> {
        match self.accounts.entry(key(&account.email)) {
            Entry::Occupied(_) => Err(AppError::validation(format!(
                "Account '{}' already exists",
                account.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(account.clone())
            }
        }
    }

    async fn update_access_token(&self, email: &str, token: &str) -> AppResult<bool> {
        Ok(match self.accounts.get_mut(&key(email)) {
            Some(mut account) => {
                account.access_token = Some(token.to_string());
                true
            }
            None => false,
        })
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|e| e.value().clone()).collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use apikit_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_lookup_by_email_is_case_insensitive() {
        let store = MemoryAccountStore::new();
        store
            .create(&Account::new("Dev@Example.com", "hash"))
            .await
            .unwrap();

        let found = store.find_by_email("dev@example.COM").await.unwrap().unwrap();
        assert_eq!(found.email, "Dev@Example.com");
        assert!(store.find_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryAccountStore::new();
        store.create(&Account::new("a@example.com", "h")).await.unwrap();
        let err = store
            .create(&Account::new("A@example.com", "h"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_rotate_token() {
        let store = MemoryAccountStore::new();
        store
            .create(&Account::new("a@example.com", "h").with_access_token("old"))
            .await
            .unwrap();

        assert!(store.update_access_token("a@example.com", "new").await.unwrap());
        assert!(store.find_by_access_token("old").await.unwrap().is_none());
        assert!(store.find_by_access_token("new").await.unwrap().is_some());
        assert!(!store.update_access_token("missing@example.com", "x").await.unwrap());
    }
}

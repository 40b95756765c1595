//! Resolves the caller's access token from the request.
//!
//! Three attempts are made in order, stopping at the first success:
//!
//! 1. the `access_token` query parameter, looked up in the account store;
//! 2. HTTP Basic `email:password`, yielding the account's stored token;
//! 3. HTTP Basic `email:token`, compared with the account's stored token.
//!
//! If none succeeds the resolution is [`TokenState::Rejected`].

use std::sync::Arc;

use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::debug;

use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;
use apikit_core::types::Account;

use super::BasicCredentials;
use crate::password::PasswordHasher;

/// States of a single resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Nothing examined yet.
    NoToken,
    /// A query-string token is being checked.
    TokenFromQuery,
    /// Basic credentials are being checked.
    TokenFromBasicAuth,
    /// A valid token was found.
    Resolved,
    /// No attempt succeeded.
    Rejected,
}

/// Which attempt produced the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// `?access_token=` query parameter.
    Query,
    /// Basic `email:password`.
    BasicPassword,
    /// Basic `email:token`.
    BasicToken,
}

/// Outcome of [`AccessTokenResolver::resolve`].
#[derive(Debug, Clone)]
pub struct TokenResolution {
    /// Final state, either [`TokenState::Resolved`] or [`TokenState::Rejected`].
    pub state: TokenState,
    /// Every state visited, starting with [`TokenState::NoToken`].
    pub transitions: Vec<TokenState>,
    /// The resolved token.
    pub access_token: Option<String>,
    /// The attempt that succeeded.
    pub source: Option<TokenSource>,
    /// The account the token belongs to.
    pub account: Option<Account>,
}

impl TokenResolution {
    /// Whether a token was found.
    pub fn is_resolved(&self) -> bool {
        self.state == TokenState::Resolved
    }
}

/// Runs the token resolution state machine against an account store.
#[derive(Clone)]
pub struct AccessTokenResolver {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl AccessTokenResolver {
    /// Create a resolver over `store`.
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Resolve the caller's token.
    ///
    /// Only account-store failures are returned as errors; bad or missing
    /// credentials yield a [`TokenState::Rejected`] resolution.
    pub async fn resolve(
        &self,
        query_token: Option<&str>,
        basic: Option<&BasicCredentials>,
    ) -> AppResult<TokenResolution> {
        let mut run = Run::default();

        if let Some(token) = query_token.map(str::trim).filter(|t| !t.is_empty()) {
            run.enter(TokenState::TokenFromQuery);
            if let Some(account) = self.store.find_by_access_token(token).await? {
                return Ok(run.resolve(token.to_string(), TokenSource::Query, account));
            }
        }

        if let Some(creds) = basic.filter(|c| !c.email.trim().is_empty()) {
            run.enter(TokenState::TokenFromBasicAuth);
            if let Some(account) = self.store.find_by_email(creds.email.trim()).await? {
                if let Some(token) = account.access_token.clone() {
                    if self.hasher.verify_password(&creds.secret, &account.password_hash)? {
                        return Ok(run.resolve(token, TokenSource::BasicPassword, account));
                    }
                    if !creds.secret.is_empty() && secrets_match(&creds.secret, &token) {
                        return Ok(run.resolve(token, TokenSource::BasicToken, account));
                    }
                } else {
                    debug!(email = %account.email, "Account has no access token");
                }
            }
        }

        Ok(run.reject())
    }
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(given: &str, stored: &str) -> bool {
    given.as_bytes().ct_eq(stored.as_bytes()).into()
}

#[derive(Debug)]
struct Run {
    transitions: Vec<TokenState>,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            transitions: vec![TokenState::NoToken],
        }
    }
}

impl Run {
    fn enter(&mut self, state: TokenState) {
        debug!(?state, "Access token resolution");
        self.transitions.push(state);
    }

    fn resolve(mut self, token: String, source: TokenSource, account: Account) -> TokenResolution {
        self.enter(TokenState::Resolved);
        TokenResolution {
            state: TokenState::Resolved,
            transitions: self.transitions,
            access_token: Some(token),
            source: Some(source),
            account: Some(account),
        }
    }

    fn reject(mut self) -> TokenResolution {
        self.enter(TokenState::Rejected);
        TokenResolution {
            state: TokenState::Rejected,
            transitions: self.transitions,
            access_token: None,
            source: None,
            account: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use apikit_database::repositories::MemoryAccountStore;

    use super::*;

    const TOKEN: &str = "tok-abc";

    async fn resolver() -> AccessTokenResolver {
        let hasher = PasswordHasher::new();
        let store = MemoryAccountStore::new();
        let hash = hasher.hash_password("hunter22").unwrap();
        store
            .create(&Account::new("dev@example.com", hash).with_access_token(TOKEN))
            .await
            .unwrap();
        AccessTokenResolver::new(Arc::new(store), hasher)
    }

    #[tokio::test]
    async fn test_query_token_resolves() {
        let res = resolver().await.resolve(Some(TOKEN), None).await.unwrap();
        assert!(res.is_resolved());
        assert_eq!(res.source, Some(TokenSource::Query));
        assert_eq!(
            res.transitions,
            vec![TokenState::NoToken, TokenState::TokenFromQuery, TokenState::Resolved]
        );
    }

    #[tokio::test]
    async fn test_basic_password_yields_stored_token() {
        let creds = BasicCredentials::new("DEV@example.com", "hunter22");
        let res = resolver().await.resolve(None, Some(&creds)).await.unwrap();
        assert_eq!(res.access_token.as_deref(), Some(TOKEN));
        assert_eq!(res.source, Some(TokenSource::BasicPassword));
    }

    #[tokio::test]
    async fn test_basic_token_pair_resolves() {
        let creds = BasicCredentials::new("dev@example.com", TOKEN);
        let res = resolver().await.resolve(None, Some(&creds)).await.unwrap();
        assert_eq!(res.source, Some(TokenSource::BasicToken));
    }

    #[tokio::test]
    async fn test_invalid_query_token_falls_back_to_basic() {
        let creds = BasicCredentials::new("dev@example.com", "hunter22");
        let res = resolver()
            .await
            .resolve(Some("stale"), Some(&creds))
            .await
            .unwrap();
        assert_eq!(res.source, Some(TokenSource::BasicPassword));
        assert_eq!(
            res.transitions,
            vec![
                TokenState::NoToken,
                TokenState::TokenFromQuery,
                TokenState::TokenFromBasicAuth,
                TokenState::Resolved
            ]
        );
    }

    #[tokio::test]
    async fn test_nothing_supplied_is_rejected() {
        let res = resolver().await.resolve(None, None).await.unwrap();
        assert_eq!(res.state, TokenState::Rejected);
        assert_eq!(res.transitions, vec![TokenState::NoToken, TokenState::Rejected]);
        assert!(res.access_token.is_none());
    }

    #[tokio::test]
    async fn test_token_prefix_is_rejected() {
        let creds = BasicCredentials::new("dev@example.com", &TOKEN[..TOKEN.len() - 1]);
        let res = resolver().await.resolve(None, Some(&creds)).await.unwrap();
        assert_eq!(res.state, TokenState::Rejected);
        assert!(secrets_match(TOKEN, TOKEN));
        assert!(!secrets_match(TOKEN, "tok-abd"));
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let creds = BasicCredentials::new("dev@example.com", "nope");
        let res = resolver().await.resolve(Some(""), Some(&creds)).await.unwrap();
        assert_eq!(res.state, TokenState::Rejected);
    }
}

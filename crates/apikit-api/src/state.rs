//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use apikit_auth::{AccessTokenResolver, PasswordHasher};
use apikit_core::config::AppConfig;
use apikit_core::traits::AccountStore;
use apikit_core::urls::UrlBuilder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>` or through the
/// [`ApiController`](crate::controller::ApiController) extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account store backing token resolution.
    pub accounts: Arc<dyn AccountStore>,
    /// Argon2 password hasher.
    pub password_hasher: Arc<PasswordHasher>,
    /// URL builder for the public address of the service.
    pub urls: Arc<UrlBuilder>,
}

impl AppState {
    /// Assemble state from configuration and an account store.
    pub fn new(config: AppConfig, accounts: Arc<dyn AccountStore>) -> Self {
        let urls = UrlBuilder::from_config(&config.server);
        Self {
            config: Arc::new(config),
            accounts,
            password_hasher: Arc::new(PasswordHasher::new()),
            urls: Arc::new(urls),
        }
    }

    /// A token resolver over the account store.
    pub fn token_resolver(&self) -> AccessTokenResolver {
        AccessTokenResolver::new(Arc::clone(&self.accounts), (*self.password_hasher).clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

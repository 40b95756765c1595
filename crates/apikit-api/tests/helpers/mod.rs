//! Shared helpers for HTTP-level tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tower::ServiceExt;

use apikit_api::{AppState, build_app};
use apikit_core::config::{AppConfig, SeedAccount};
use apikit_core::error::AppError;
use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;
use apikit_core::types::Account;
use apikit_database::repositories::MemoryAccountStore;

pub const EMAIL: &str = "dev@example.com";
pub const PASSWORD: &str = "correct horse battery";
pub const TOKEN: &str = "test-access-token";

/// Test application backed by the in-memory account store.
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.server.public_host = "api.test".to_string();
        config.database.accounts = vec![SeedAccount {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            access_token: Some(TOKEN.to_string()),
        }];

        let store = Arc::new(MemoryAccountStore::new());
        apikit_api::app::seed_accounts(store.as_ref(), &config)
            .await
            .expect("Failed to seed accounts");

        Self::with_store(config, store)
    }

    /// Application over a custom account store.
    pub fn with_store(config: AppConfig, store: Arc<dyn AccountStore>) -> Self {
        Self {
            router: build_app(AppState::new(config, store)),
        }
    }

    /// Application whose account store fails every call.
    pub fn with_broken_store() -> Self {
        let mut config = AppConfig::default();
        config.server.public_host = "api.test".to_string();
        Self::with_store(config, Arc::new(BrokenStore))
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn request(&self, method: &str, path: &str, basic: Option<(&str, &str)>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some((user, secret)) = basic {
            let encoded = STANDARD.encode(format!("{user}:{secret}"));
            req = req.header("Authorization", format!("Basic {encoded}"));
        }
        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            raw,
            body,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Vec<u8>,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Business errors keyed by code.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.body
            .get("errors")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Account store that is always unreachable.
pub struct BrokenStore;

#[async_trait]
impl AccountStore for BrokenStore {
    async fn find_by_access_token(&self, _token: &str) -> AppResult<Option<Account>> {
        Err(AppError::database("account store unavailable"))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
        Err(AppError::database("account store unavailable"))
    }

    async fn create(&self, _account: &Account) -> AppResult<Account> {
        Err(AppError::database("account store unavailable"))
    }

    async fn update_access_token(&self, _email: &str, _token: &str) -> AppResult<bool> {
        Err(AppError::database("account store unavailable"))
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        Err(AppError::database("account store unavailable"))
    }
}

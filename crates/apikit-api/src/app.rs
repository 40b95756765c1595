//! Application builder: wires the account store, state and router together.

use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use apikit_auth::PasswordHasher;
use apikit_auth::secret::generate_access_token;
use apikit_core::config::AppConfig;
use apikit_core::error::AppError;
use apikit_core::result::AppResult;
use apikit_core::traits::AccountStore;
use apikit_core::types::Account;
use apikit_database::open_account_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Open the configured account store and create any seed accounts it lacks.
pub async fn build_account_store(config: &AppConfig) -> AppResult<Arc<dyn AccountStore>> {
    let store = open_account_store(&config.database).await?;
    seed_accounts(store.as_ref(), config).await?;
    Ok(store)
}

/// Create the accounts listed under `database.accounts` that do not exist yet.
pub async fn seed_accounts(store: &dyn AccountStore, config: &AppConfig) -> AppResult<usize> {
    let hasher = PasswordHasher::new();
    let mut created = 0;

    for seed in &config.database.accounts {
        if store.find_by_email(&seed.email).await?.is_some() {
            continue;
        }

        let token = seed
            .access_token
            .clone()
            .unwrap_or_else(|| generate_access_token(&config.security));
        let account =
            Account::new(&seed.email, hasher.hash_password(&seed.password)?).with_access_token(token);
        store.create(&account).await?;
        info!(email = %seed.email, "Seeded API account");
        created += 1;
    }

    Ok(created)
}

/// Runs the apikit HTTP server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting apikit server...");

    let accounts = build_account_store(&config).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(AppState::new(config, accounts));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("apikit server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("apikit server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::{net::TcpListener, signal};

use elearning_auth_server::{
    api::router,
    auth::{
        default_public_rules, password::hash_password, AuthGate, ClassifierError, Role,
        RouteClassifier, TokenCodec,
    },
    config::{AppConfig, ConfigError, SeedAdmin},
    state::AppState,
    store::InMemoryStore,
    telemetry::init_tracing,
};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install tracing subscriber: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid public route rules: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("failed to seed admin account: {0}")]
    Seed(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    tracing::info!(?config, "Configuration loaded");

    let classifier = RouteClassifier::new(default_public_rules())?;
    let codec = Arc::new(TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl,
    ));

    let mut store = InMemoryStore::new();
    if let Some(seed) = &config.seed_admin {
        seed_admin(&mut store, seed)?;
    }

    let state = AppState::new(store, AuthGate::new(codec, classifier));
    let app = router(state, config.cors_allowed_origin.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(%addr, "E-learning auth server listening (docs at /swagger-ui/)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

fn seed_admin(store: &mut InMemoryStore, seed: &SeedAdmin) -> Result<(), StartupError> {
    let password_hash =
        hash_password(&seed.password).map_err(|e| StartupError::Seed(e.to_string()))?;
    let email = format!("{}@localhost", seed.username);

    store
        .insert(
            &seed.username,
            &email,
            &seed.username,
            Role::Admin,
            password_hash,
        )
        .map_err(|e| StartupError::Seed(e.message))?;

    tracing::info!(username = %seed.username, "Seeded admin account");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, stopping server");
}

use std::sync::Arc;

use anyhow::Context;

use crate::ai::GeminiClient;
use crate::auth::TokenIssuer;
use crate::config;
use crate::database::{DatabaseManager, PgStore};
use crate::router::{self, AppState};

pub async fn handle(host: Option<String>, port: Option<u16>, skip_migrations: bool) -> anyhow::Result<()> {
    let config = config::config();
    config.validate().map_err(anyhow::Error::msg)?;
    tracing::info!("Starting Zense API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)?;
    if skip_migrations {
        tracing::info!("Skipping database migrations");
    } else {
        db.migrate().await.context("failed to apply migrations")?;
    }

    if config.ai.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; vent chat requests will fail with 502");
    }
    let tokens = Arc::new(TokenIssuer::from_config(&config.security)?);
    let model = Arc::new(GeminiClient::from_config(&config.ai)?);
    let store = Arc::new(PgStore::new(db.pool().clone()));
    let state = AppState::new(store, tokens, model, bcrypt::DEFAULT_COST);
    let app = router::app(state, &config.security);

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Zense API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

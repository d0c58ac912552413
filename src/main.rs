use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dental_api_rust::config::{config, StoreBackend};
use dental_api_rust::models::COLLECTIONS;
use dental_api_rust::routes::app;
use dental_api_rust::state::AppState;
use dental_api_rust::store::{DynamoStore, ItemStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DYNAMODB_ENDPOINT etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config();
    tracing::info!("starting in {:?} mode", config.environment);

    // An unreachable store at startup is fatal
    let store: Arc<dyn ItemStore> = match config.store.backend {
        StoreBackend::Dynamo => {
            let store = DynamoStore::connect(&config.store)
                .await
                .context("store unreachable")?;
            store
                .ensure_collections(&config.store.table_prefix, &COLLECTIONS)
                .await
                .context("failed to provision collections")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, config.store.table_prefix.clone());
    let router = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server exited")?;
    Ok(())
}

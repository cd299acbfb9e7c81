//! FraudGate server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fraudgate::config::Config;
use fraudgate::ingest::Pipeline;
use fraudgate::scoring::HttpScorer;
use fraudgate::store::{MemoryStore, PgTransactionStore, TransactionStore};
use fraudgate::{create_router, db, replay, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "fraudgate=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("FraudGate server starting...");

    // Initialize the transaction store
    let store: Arc<dyn TransactionStore> = match config.store_backend.as_str() {
        "memory" => {
            tracing::info!("Using in-memory transaction store");
            Arc::new(MemoryStore::new())
        }
        _ => {
            tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));
            let pool = db::create_pool(&config.database_url)
                .await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgTransactionStore::new(pool))
        }
    };

    // Assemble the ingestion pipeline
    let scorer = Arc::new(HttpScorer::new(
        config.scorer_url.clone(),
        config.scorer_timeout_secs,
    ));
    let pipeline = Arc::new(Pipeline::new(
        store.clone(),
        scorer,
        config.fallback_probability,
    ));

    let state = AppState {
        config: config.clone(),
        store: store.clone(),
        pipeline: pipeline.clone(),
    };

    // Replay feeder runs in the background; request serving starts without
    // waiting for it.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    if config.replay_enabled {
        tokio::spawn(replay::run(store, pipeline, config.clone(), shutdown_rx));
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
}

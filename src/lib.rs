//! FraudGate - Transaction Fraud Decision Server
//!
//! Assesses incoming financial transactions for fraud risk: each ingested
//! transaction is scored by an external oracle, enriched with the returned
//! risk features, classified into a risk tier by a fixed threshold table,
//! persisted once, and counted into the dashboard statistics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FRAUDGATE                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────┐  ┌──────────────────────────┐ │
//! │  │  API      │  │  Ingestion │  │  Replay Feeder           │ │
//! │  │  (Axum)   │─▶│  Pipeline  │◀─│  (Background Task)       │ │
//! │  └───────────┘  └─────┬──────┘  └──────────────────────────┘ │
//! │                       │ score                                │
//! │                       ▼                                      │
//! │               ┌──────────────┐      ┌─────────────┐          │
//! │               │ Scoring      │      │ Transaction │          │
//! │               │ Oracle (HTTP)│      │ Store       │          │
//! │               └──────────────┘      └─────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod replay;
pub mod risk;
pub mod scoring;
pub mod stats;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: Arc<dyn store::TransactionStore>,
    pub pipeline: Arc<ingest::Pipeline>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))

        // Ingestion
        .route("/api/v1/transactions", post(handlers::transactions::create))

        // Listing / dashboard
        .route("/api/v1/transactions", get(handlers::transactions::list))
        .route("/api/v1/transactions/high-risk", get(handlers::transactions::high_risk))
        .route("/api/v1/transactions/stats", get(handlers::transactions::stats))
        .route("/api/v1/transactions/:id", get(handlers::transactions::get))

        // Manual override
        .route("/api/v1/transactions/:id/status", patch(handlers::transactions::update_status))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

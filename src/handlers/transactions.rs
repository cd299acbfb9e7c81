//! Transaction handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{Transaction, TransactionInput, TransactionQuery, UpdateTransactionStatus};
use crate::risk::HIGH_RISK_THRESHOLD;
use crate::stats::RiskStats;
use crate::{AppError, AppResult, AppState};

/// Assess and persist a transaction
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let txn = state.pipeline.ingest(input).await?;
    Ok((StatusCode::CREATED, Json(txn)))
}

/// List transactions, optionally filtered by tier or score threshold
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<Vec<Transaction>>> {
    let txns = state.store.list(&query).await?;
    Ok(Json(txns))
}

/// Get single transaction
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Transaction>> {
    let txn = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction not found: {}", id)))?;

    Ok(Json(txn))
}

/// High-risk transactions for the alerts page
pub async fn high_risk(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let query = TransactionQuery {
        min_risk_score: Some(HIGH_RISK_THRESHOLD),
        ..Default::default()
    };
    let txns = state.store.list(&query).await?;
    Ok(Json(txns))
}

/// Dashboard risk statistics
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<RiskStats>> {
    let stats = crate::stats::compute(state.store.as_ref()).await?;
    Ok(Json(stats))
}

/// Manual status override (mark as legitimate/fraud)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTransactionStatus>,
) -> AppResult<Json<Transaction>> {
    let txn = state
        .store
        .update_status(id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction not found: {}", id)))?;

    tracing::info!("Status override: {} -> {}", txn.id, txn.status);

    Ok(Json(txn))
}

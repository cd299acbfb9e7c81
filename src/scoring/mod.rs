//! Scoring oracle client
//!
//! One remote call per ingestion: the client-supplied fields go out, a
//! fraud probability and a feature bundle come back. Every failure mode is
//! a [`ScoringError`]; the orchestrator absorbs them all the same way.

pub mod client;

pub use client::HttpScorer;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{TransactionFeatures, TransactionInput};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("network error: {0}")]
    Network(String),

    #[error("scoring request timed out")]
    Timeout,

    #[error("scoring service returned status {0}")]
    Server(u16),

    #[error("invalid scoring response: {0}")]
    Parse(String),
}

/// Successful oracle verdict.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub fraud_probability: f64,
    pub features: TransactionFeatures,
}

/// Oracle wire response.
#[derive(Debug, Deserialize)]
pub struct ScoreResponse {
    pub fraud_probability: f64,
    pub is_fraud: Option<bool>,
    #[serde(default)]
    pub features: TransactionFeatures,
}

#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, input: &TransactionInput) -> Result<Prediction, ScoringError>;
}

//! Ingestion orchestrator
//!
//! The single "assess and persist" operation: validate the input, ask the
//! oracle, merge features, classify, store. One scoring call and at most
//! one persisted record per ingestion; a scoring fault degrades the verdict
//! to the fallback probability instead of failing the request.

use std::sync::Arc;

use validator::Validate;

use crate::error::AppResult;
use crate::models::{Transaction, TransactionFeatures, TransactionInput, DEFAULT_CHANNEL};
use crate::risk;
use crate::scoring::Scorer;
use crate::store::{NewTransaction, TransactionStore};

pub struct Pipeline {
    store: Arc<dyn TransactionStore>,
    scorer: Arc<dyn Scorer>,
    fallback_probability: f64,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn TransactionStore>,
        scorer: Arc<dyn Scorer>,
        fallback_probability: f64,
    ) -> Self {
        Self {
            store,
            scorer,
            fallback_probability,
        }
    }

    /// Assess one transaction and persist the verdict.
    pub async fn ingest(&self, input: TransactionInput) -> AppResult<Transaction> {
        input.validate()?;

        let (probability, bundle) = match self.scorer.score(&input).await {
            Ok(prediction) => (prediction.fraud_probability, prediction.features),
            Err(e) => {
                // Fail open: an unavailable scorer sends the record to
                // human review, it does not block ingestion.
                tracing::warn!(
                    "Scoring failed ({}), falling back to probability {}",
                    e,
                    self.fallback_probability
                );
                (self.fallback_probability, TransactionFeatures::default())
            }
        };

        let mut features = TransactionFeatures::default();
        features.merge(&bundle);

        let (status, risk_level) = risk::classify(probability);

        let new = NewTransaction {
            cc_number: input.cc_number,
            amount: input.amount,
            category: input.category,
            latitude: input.latitude,
            longitude: input.longitude,
            merchant: input.merchant.unwrap_or_default(),
            channel: input.channel.unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            device_id: input.device_id,
            features,
            risk_score: probability,
            status: status.as_str().to_string(),
            risk_level: risk_level.as_str().to_string(),
        };

        let txn = self.store.create(new).await?;

        tracing::info!(
            "Transaction assessed: {} {} ${:.2} -> {} ({})",
            txn.id,
            txn.category,
            txn.amount,
            txn.status,
            txn.risk_level
        );

        Ok(txn)
    }
}

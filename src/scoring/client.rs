//! HTTP client for the scoring oracle

use std::time::Duration;

use async_trait::async_trait;

use crate::models::TransactionInput;

use super::{Prediction, Scorer, ScoreResponse, ScoringError};

pub struct HttpScorer {
    url: String,
    http_client: reqwest::Client,
}

impl HttpScorer {
    pub fn new(url: String, timeout_secs: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { url, http_client }
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, input: &TransactionInput) -> Result<Prediction, ScoringError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScoringError::Timeout
                } else {
                    ScoringError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ScoringError::Server(response.status().as_u16()));
        }

        let body: ScoreResponse = response
            .json()
            .await
            .map_err(|e| ScoringError::Parse(e.to_string()))?;

        // Probability outside [0,1] means the oracle is broken, not that
        // the transaction is extra risky.
        if !(0.0..=1.0).contains(&body.fraud_probability) {
            return Err(ScoringError::Parse(format!(
                "fraud_probability {} out of range",
                body.fraud_probability
            )));
        }

        Ok(Prediction {
            fraud_probability: body.fraud_probability,
            features: body.features,
        })
    }
}

//! Risk statistics aggregator

use serde::Serialize;

use crate::risk::{CRITICAL_RISK_THRESHOLD, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
use crate::store::{StoreError, TransactionStore};

/// Bucketed risk counts for the dashboard.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskStats {
    pub total: u64,
    pub low_risk: u64,
    pub medium_risk: u64,
    pub high_risk: u64,
    pub critical: u64,
    pub flagged: u64,
    pub blocked: u64,
}

/// Compute bucketed counts over the store.
///
/// Buckets come from the classifier's threshold boundaries applied to the
/// stored risk score, derived by subtraction of the cumulative counts, so
/// `flagged == highRisk + critical` and `blocked == critical` hold for any
/// store content.
pub async fn compute(store: &dyn TransactionStore) -> Result<RiskStats, StoreError> {
    let total = store.count().await?;
    let at_least_medium = store.count_score_at_least(MEDIUM_RISK_THRESHOLD).await?;
    let at_least_high = store.count_score_at_least(HIGH_RISK_THRESHOLD).await?;
    let critical = store.count_score_at_least(CRITICAL_RISK_THRESHOLD).await?;

    let high_risk = at_least_high - critical;

    Ok(RiskStats {
        total,
        low_risk: total - at_least_medium,
        medium_risk: at_least_medium - at_least_high,
        high_risk,
        critical,
        flagged: high_risk + critical,
        blocked: critical,
    })
}

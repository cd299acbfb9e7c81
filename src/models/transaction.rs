//! Transaction model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::TransactionFeatures;
use crate::risk::{RiskLevel, TransactionStatus};

/// Channel recorded when the client does not supply one.
pub const DEFAULT_CHANNEL: &str = "in_store";

/// A persisted transaction with its scoring verdict.
///
/// Immutable once stored, except for the manual status override.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub cc_number: String,
    pub amount: f64,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub merchant: String,
    pub channel: String,
    pub device_id: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub features: TransactionFeatures,

    pub risk_score: f64,
    pub status: String,
    pub risk_level: String,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied input for one ingestion.
///
/// Field aliases accept both the wire names and the camelCase variants the
/// dashboard sends.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionInput {
    #[serde(alias = "ccNumber")]
    #[validate(length(min = 1, message = "card number is required"))]
    pub cc_number: String,

    #[validate(range(min = 0.0, message = "amount must be non-negative"))]
    pub amount: f64,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(alias = "deviceId", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Manual status override request.
///
/// Deliberately not re-checked against the threshold table; see DESIGN.md.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionStatus {
    pub status: TransactionStatus,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionQuery {
    pub risk_level: Option<RiskLevel>,
    pub min_risk_score: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

//! Risk classification
//!
//! Deterministic threshold table mapping a fraud probability onto a risk
//! tier and an actionable status. The stats aggregator and the high-risk
//! alerts feed use the same boundaries, so a persisted verdict and the
//! bucket a record is counted in can never disagree.

use serde::{Deserialize, Serialize};

/// Lower bound of the MEDIUM tier (status REVIEW).
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.30;

/// Lower bound of the HIGH tier (status FLAGGED).
pub const HIGH_RISK_THRESHOLD: f64 = 0.60;

/// Lower bound of the CRITICAL tier (status BLOCKED).
pub const CRITICAL_RISK_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Approved,
    Review,
    Flagged,
    Blocked,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Review => "REVIEW",
            TransactionStatus::Flagged => "FLAGGED",
            TransactionStatus::Blocked => "BLOCKED",
        }
    }
}

/// Classify a fraud probability.
///
/// Evaluated high-to-low; each boundary belongs to the tier it opens.
pub fn classify(probability: f64) -> (TransactionStatus, RiskLevel) {
    if probability >= CRITICAL_RISK_THRESHOLD {
        (TransactionStatus::Blocked, RiskLevel::Critical)
    } else if probability >= HIGH_RISK_THRESHOLD {
        (TransactionStatus::Flagged, RiskLevel::High)
    } else if probability >= MEDIUM_RISK_THRESHOLD {
        (TransactionStatus::Review, RiskLevel::Medium)
    } else {
        (TransactionStatus::Approved, RiskLevel::Low)
    }
}

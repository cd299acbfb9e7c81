//! Transaction store adapter
//!
//! The rest of the service treats storage as an opaque record store behind
//! the [`TransactionStore`] trait: `create` assigns identity and timestamp
//! and persists the whole record atomically, readers get full records or
//! nothing. The Postgres implementation is the production backend; the
//! in-memory one backs development and the test suite.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgTransactionStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Transaction, TransactionFeatures, TransactionQuery};
use crate::risk::TransactionStatus;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A fully assessed transaction, ready to persist.
///
/// Identity and timestamp are assigned by the store at create time.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub cc_number: String,
    pub amount: f64,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub merchant: String,
    pub channel: String,
    pub device_id: Option<String>,
    pub features: TransactionFeatures,
    pub risk_score: f64,
    pub status: String,
    pub risk_level: String,
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new record, assigning id and timestamp.
    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError>;

    /// Fetch one record by id.
    async fn get(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;

    /// List records matching the query, newest first.
    async fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, StoreError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Number of records with `risk_score >= min`.
    async fn count_score_at_least(&self, min: f64) -> Result<u64, StoreError>;

    /// Manual status override. Touches only `status`; risk score and
    /// features stay as classified.
    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>, StoreError>;
}

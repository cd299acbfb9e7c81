//! In-memory store implementation
//!
//! Backs `STORE_BACKEND=memory` and the test suite. Writes append under a
//! write lock, reads clone under a read lock, so a reader never observes a
//! half-written record.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{Transaction, TransactionQuery};
use crate::risk::TransactionStatus;

use super::{NewTransaction, StoreError, TransactionStore};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let txn = Transaction {
            id: Uuid::new_v4(),
            cc_number: new.cc_number,
            amount: new.amount,
            category: new.category,
            latitude: new.latitude,
            longitude: new.longitude,
            merchant: new.merchant,
            channel: new.channel,
            device_id: new.device_id,
            features: new.features,
            risk_score: new.risk_score,
            status: new.status,
            risk_level: new.risk_level,
            created_at: Utc::now(),
        };

        self.records.write().push(txn.clone());
        Ok(txn)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(self.records.read().iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, StoreError> {
        let limit = query.limit.unwrap_or(50).max(0) as usize;
        let offset = query.offset.unwrap_or(0).max(0) as usize;

        let records = self.records.read();
        let matches = records
            .iter()
            .rev() // newest first, creation order
            .filter(|t| {
                query
                    .risk_level
                    .map_or(true, |level| t.risk_level == level.as_str())
            })
            .filter(|t| query.min_risk_score.map_or(true, |min| t.risk_score >= min))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(matches)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().len() as u64)
    }

    async fn count_score_at_least(&self, min: f64) -> Result<u64, StoreError> {
        let count = self
            .records
            .read()
            .iter()
            .filter(|t| t.risk_score >= min)
            .count();

        Ok(count as u64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>, StoreError> {
        let mut records = self.records.write();
        match records.iter_mut().find(|t| t.id == id) {
            Some(txn) => {
                txn.status = status.as_str().to_string();
                Ok(Some(txn.clone()))
            }
            None => Ok(None),
        }
    }
}

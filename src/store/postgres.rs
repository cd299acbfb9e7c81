//! PostgreSQL store implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Transaction, TransactionQuery};
use crate::risk::TransactionStatus;

use super::{NewTransaction, StoreError, TransactionStore};

pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let txn = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                cc_number, amount, category, latitude, longitude, merchant, channel, device_id,
                f_amount_zscore, f_amount_to_avg_ratio, f_travel_velocity_kmh, f_travel_distance_km,
                f_txn_count_1h, f_txn_count_24h, f_txn_count_7d, f_seconds_since_last_txn,
                f_hour_of_day, f_is_new_device, f_is_new_merchant,
                risk_score, status, risk_level
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
            RETURNING *
            "#
        )
        .bind(&new.cc_number)
        .bind(new.amount)
        .bind(&new.category)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(&new.merchant)
        .bind(&new.channel)
        .bind(&new.device_id)
        .bind(new.features.f_amount_zscore)
        .bind(new.features.f_amount_to_avg_ratio)
        .bind(new.features.f_travel_velocity_kmh)
        .bind(new.features.f_travel_distance_km)
        .bind(new.features.f_txn_count_1h)
        .bind(new.features.f_txn_count_24h)
        .bind(new.features.f_txn_count_7d)
        .bind(new.features.f_seconds_since_last_txn)
        .bind(new.features.f_hour_of_day)
        .bind(new.features.f_is_new_device)
        .bind(new.features.f_is_new_merchant)
        .bind(new.risk_score)
        .bind(&new.status)
        .bind(&new.risk_level)
        .fetch_one(&self.pool)
        .await?;

        Ok(txn)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        let txn = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(txn)
    }

    async fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, StoreError> {
        let limit = query.limit.unwrap_or(50);
        let offset = query.offset.unwrap_or(0);

        let txns = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE ($1::text IS NULL OR risk_level = $1)
              AND ($2::float8 IS NULL OR risk_score >= $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        )
        .bind(query.risk_level.map(|l| l.as_str()))
        .bind(query.min_risk_score)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(txns)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn count_score_at_least(&self, min: f64) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE risk_score >= $1")
                .bind(min)
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Option<Transaction>, StoreError> {
        let txn = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET status = $2
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(txn)
    }
}

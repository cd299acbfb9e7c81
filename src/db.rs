//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::query(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Assessed transactions
CREATE TABLE IF NOT EXISTS transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    cc_number VARCHAR(32) NOT NULL,
    amount DOUBLE PRECISION NOT NULL,
    category VARCHAR(100) NOT NULL,
    latitude DOUBLE PRECISION,
    longitude DOUBLE PRECISION,
    merchant VARCHAR(255) NOT NULL DEFAULT '',
    channel VARCHAR(50) NOT NULL DEFAULT 'in_store',
    device_id VARCHAR(255),

    -- Features computed by the scoring oracle
    f_amount_zscore DOUBLE PRECISION,
    f_amount_to_avg_ratio DOUBLE PRECISION,
    f_travel_velocity_kmh DOUBLE PRECISION,
    f_travel_distance_km DOUBLE PRECISION,
    f_txn_count_1h INT,
    f_txn_count_24h INT,
    f_txn_count_7d INT,
    f_seconds_since_last_txn DOUBLE PRECISION,
    f_hour_of_day INT,
    f_is_new_device INT,
    f_is_new_merchant INT,

    -- Verdict
    risk_score DOUBLE PRECISION NOT NULL,
    status VARCHAR(20) NOT NULL,
    risk_level VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_transactions_risk_score ON transactions(risk_score);
CREATE INDEX IF NOT EXISTS idx_transactions_risk_level ON transactions(risk_level);
CREATE INDEX IF NOT EXISTS idx_transactions_created ON transactions(created_at);
CREATE INDEX IF NOT EXISTS idx_transactions_cc ON transactions(cc_number);
"#;

//! Replay feeder
//!
//! One-shot startup task that replays a fixture set of transactions through
//! the ingestion pipeline with randomized inter-arrival delays, so the
//! oracle's velocity and frequency features see a realistic time series.
//! Skips entirely when the store already holds records, which keeps the
//! replay idempotent across restarts.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;

use crate::config::Config;
use crate::ingest::Pipeline;
use crate::models::TransactionInput;
use crate::store::TransactionStore;

/// Load the fixture set from a JSON file.
pub fn load_fixtures(path: impl AsRef<Path>) -> anyhow::Result<Vec<TransactionInput>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file {}", path.display()))?;
    let fixtures: Vec<TransactionInput> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse fixture file {}", path.display()))?;

    Ok(fixtures)
}

/// Run the replay to completion, or until shutdown is signalled.
///
/// Ingest faults are skip-and-continue; shutdown is honored between items,
/// never by aborting an in-flight ingest.
pub async fn run(
    store: Arc<dyn TransactionStore>,
    pipeline: Arc<Pipeline>,
    config: Config,
    mut shutdown: watch::Receiver<bool>,
) {
    match store.count().await {
        Ok(0) => {}
        Ok(existing) => {
            tracing::info!("Store already holds {} transactions - skipping replay", existing);
            return;
        }
        Err(e) => {
            tracing::error!("Replay precondition check failed: {}", e);
            return;
        }
    }

    let fixtures = match load_fixtures(&config.replay_fixture_path) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            tracing::error!("Replay disabled: {:#}", e);
            return;
        }
    };

    let mut rng = match config.replay_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let delay_min = config.replay_delay_ms_min;
    let delay_max = config.replay_delay_ms_max.max(delay_min);
    let total = fixtures.len();
    tracing::info!("Replaying {} fixture transactions ...", total);

    for (i, input) in fixtures.into_iter().enumerate() {
        let delay = rng.gen_range(delay_min..=delay_max);
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(delay)) => {}
            _ = shutdown.changed() => {
                tracing::info!("Replay stopped after {}/{} transactions", i, total);
                return;
            }
        }

        let label = format!("{} ${:.2}", input.category, input.amount);
        match pipeline.ingest(input).await {
            Ok(_) => tracing::info!("[{}/{}] Replayed {}", i + 1, total, label),
            Err(e) => tracing::warn!("[{}/{}] Replay ingest failed for {}: {:?}", i + 1, total, label, e),
        }

        if *shutdown.borrow() {
            tracing::info!("Replay stopped after {}/{} transactions", i + 1, total);
            return;
        }
    }

    tracing::info!("Replay complete - {} transactions offered", total);
}

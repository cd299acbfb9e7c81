//! End-to-end pipeline tests over the in-memory store with stub scorers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use fraudgate::config::Config;
use fraudgate::ingest::Pipeline;
use fraudgate::models::{TransactionFeatures, TransactionInput};
use fraudgate::replay;
use fraudgate::risk;
use fraudgate::scoring::{Prediction, Scorer, ScoringError};
use fraudgate::stats;
use fraudgate::store::{MemoryStore, TransactionStore};

/// Scorer returning a fixed prediction.
struct FixedScorer {
    probability: f64,
    features: TransactionFeatures,
}

#[async_trait]
impl Scorer for FixedScorer {
    async fn score(&self, _input: &TransactionInput) -> Result<Prediction, ScoringError> {
        Ok(Prediction {
            fraud_probability: self.probability,
            features: self.features.clone(),
        })
    }
}

/// Scorer that always faults.
struct FailingScorer;

#[async_trait]
impl Scorer for FailingScorer {
    async fn score(&self, _input: &TransactionInput) -> Result<Prediction, ScoringError> {
        Err(ScoringError::Network("connection refused".into()))
    }
}

/// Scorer counting how often it is called.
struct CountingScorer {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Scorer for CountingScorer {
    async fn score(&self, _input: &TransactionInput) -> Result<Prediction, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Prediction {
            fraud_probability: 0.2,
            features: TransactionFeatures::default(),
        })
    }
}

fn pipeline_with(scorer: Arc<dyn Scorer>) -> (Arc<dyn TransactionStore>, Arc<Pipeline>) {
    let store: Arc<dyn TransactionStore> = Arc::new(MemoryStore::new());
    let pipeline = Arc::new(Pipeline::new(store.clone(), scorer, 0.5));
    (store, pipeline)
}

fn input(cc: &str, amount: f64, category: &str) -> TransactionInput {
    TransactionInput {
        cc_number: cc.into(),
        amount,
        category: category.into(),
        latitude: None,
        longitude: None,
        merchant: None,
        channel: None,
        device_id: None,
    }
}

fn replay_config(fixture_path: &std::path::Path) -> Config {
    Config {
        database_url: String::new(),
        port: 0,
        store_backend: "memory".into(),
        scorer_url: String::new(),
        scorer_timeout_secs: 1,
        fallback_probability: 0.5,
        replay_enabled: true,
        replay_fixture_path: fixture_path.to_string_lossy().into_owned(),
        replay_delay_ms_min: 1,
        replay_delay_ms_max: 2,
        replay_seed: Some(7),
        environment: "test".into(),
    }
}

fn write_fixtures(entries: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", entries).unwrap();
    file
}

#[tokio::test]
async fn blocked_critical_end_to_end() {
    let scorer = Arc::new(FixedScorer {
        probability: 0.85,
        features: TransactionFeatures {
            f_hour_of_day: Some(3),
            ..Default::default()
        },
    });
    let (store, pipeline) = pipeline_with(scorer);

    let txn = pipeline
        .ingest(TransactionInput {
            latitude: Some(51.5),
            longitude: Some(-0.1),
            ..input("4111", 5000.0, "wire")
        })
        .await
        .unwrap();

    assert_eq!(txn.status, "BLOCKED");
    assert_eq!(txn.risk_level, "CRITICAL");
    assert_eq!(txn.risk_score, 0.85);
    assert_eq!(txn.features.f_hour_of_day, Some(3));
    // everything the oracle omitted stays absent
    assert_eq!(txn.features.f_amount_zscore, None);
    assert_eq!(txn.features.f_travel_velocity_kmh, None);
    assert_eq!(txn.features.f_is_new_device, None);
    // defaults for fields the client omitted
    assert_eq!(txn.merchant, "");
    assert_eq!(txn.channel, "in_store");

    assert_eq!(store.count().await.unwrap(), 1);
    let stored = store.get(txn.id).await.unwrap().unwrap();
    assert_eq!(stored.status, "BLOCKED");
}

#[tokio::test]
async fn scoring_fault_fails_open() {
    let (store, pipeline) = pipeline_with(Arc::new(FailingScorer));

    let txn = pipeline.ingest(input("4111", 25.0, "grocery")).await.unwrap();

    assert_eq!(txn.risk_score, 0.5);
    assert_eq!(txn.status, "REVIEW");
    assert_eq!(txn.risk_level, "MEDIUM");
    assert_eq!(txn.features, TransactionFeatures::default());
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn validation_fault_persists_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (store, pipeline) = pipeline_with(Arc::new(CountingScorer { calls: calls.clone() }));

    assert!(pipeline.ingest(input("4111", -1.0, "grocery")).await.is_err());
    assert!(pipeline.ingest(input("4111", 10.0, "")).await.is_err());
    assert!(pipeline.ingest(input("", 10.0, "grocery")).await.is_err());

    // fail fast: no scoring call, no record
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn stats_buckets_for_known_scores() {
    let store: Arc<dyn TransactionStore> = Arc::new(MemoryStore::new());
    for score in [0.1, 0.35, 0.65, 0.85, 0.95] {
        let scorer = Arc::new(FixedScorer {
            probability: score,
            features: TransactionFeatures::default(),
        });
        let pipeline = Pipeline::new(store.clone(), scorer, 0.5);
        pipeline.ingest(input("4111", 100.0, "grocery")).await.unwrap();
    }

    let stats = stats::compute(store.as_ref()).await.unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.low_risk, 1);
    assert_eq!(stats.medium_risk, 1);
    assert_eq!(stats.high_risk, 1);
    assert_eq!(stats.critical, 2);
    assert_eq!(stats.flagged, 3);
    assert_eq!(stats.blocked, 2);
}

#[tokio::test]
async fn stats_consistent_on_empty_store() {
    let store = MemoryStore::new();
    let stats = stats::compute(&store).await.unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.flagged, stats.high_risk + stats.critical);
    assert_eq!(stats.blocked, stats.critical);
}

#[tokio::test]
async fn persisted_verdict_agrees_with_classifier() {
    let store: Arc<dyn TransactionStore> = Arc::new(MemoryStore::new());
    for score in [0.0, 0.2999, 0.3, 0.45, 0.5999, 0.6, 0.7999, 0.8, 1.0] {
        let scorer = Arc::new(FixedScorer {
            probability: score,
            features: TransactionFeatures::default(),
        });
        let pipeline = Pipeline::new(store.clone(), scorer, 0.5);
        pipeline.ingest(input("4111", 10.0, "grocery")).await.unwrap();
    }

    let all = store.list(&Default::default()).await.unwrap();
    assert_eq!(all.len(), 9);
    for txn in all {
        let (status, level) = risk::classify(txn.risk_score);
        assert_eq!(txn.status, status.as_str());
        assert_eq!(txn.risk_level, level.as_str());
    }
}

#[tokio::test]
async fn replay_skips_non_empty_store() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (store, pipeline) = pipeline_with(Arc::new(CountingScorer { calls: calls.clone() }));

    // pre-seed one record
    pipeline.ingest(input("4111", 10.0, "grocery")).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let fixtures = write_fixtures(
        r#"[{"cc_number": "4222", "amount": 5.0, "category": "misc"},
            {"cc_number": "4333", "amount": 6.0, "category": "misc"}]"#,
    );
    let (_tx, rx) = watch::channel(false);
    replay::run(store.clone(), pipeline, replay_config(fixtures.path()), rx).await;

    // no additional ingest calls, no additional records
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn replay_feeds_every_fixture() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (store, pipeline) = pipeline_with(Arc::new(CountingScorer { calls: calls.clone() }));

    let fixtures = write_fixtures(
        r#"[{"cc_number": "4222", "amount": 5.0, "category": "misc"},
            {"cc_number": "4333", "amount": 6.0, "category": "grocery"},
            {"cc_number": "4444", "amount": 7.0, "category": "wire"}]"#,
    );
    let (_tx, rx) = watch::channel(false);
    replay::run(store.clone(), pipeline, replay_config(fixtures.path()), rx).await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn replay_continues_past_ingest_faults() {
    // invalid fixtures (negative amount) are skipped, valid ones land
    let (store, pipeline) = pipeline_with(Arc::new(FailingScorer));

    let fixtures = write_fixtures(
        r#"[{"cc_number": "4222", "amount": -5.0, "category": "misc"},
            {"cc_number": "4333", "amount": 6.0, "category": "grocery"}]"#,
    );
    let (_tx, rx) = watch::channel(false);
    replay::run(store.clone(), pipeline, replay_config(fixtures.path()), rx).await;

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn replay_stops_on_shutdown() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (store, pipeline) = pipeline_with(Arc::new(CountingScorer { calls: calls.clone() }));

    let fixtures = write_fixtures(
        r#"[{"cc_number": "4222", "amount": 5.0, "category": "misc"}]"#,
    );
    let mut config = replay_config(fixtures.path());
    config.replay_delay_ms_min = 30_000;
    config.replay_delay_ms_max = 60_000;

    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();
    replay::run(store.clone(), pipeline, config, rx).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

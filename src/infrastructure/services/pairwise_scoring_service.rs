//! Pairwise similarity scoring service
//!
//! Walks every unordered pair of talks once, scoring the pairs missing from
//! the cache and saving the cache after each new score.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::{
    CacheStore, DomainError, PairKey, SimilarityCache, SimilarityOracle, Sleeper, Talk,
};

/// Delay after each newly scored pair, to stay under provider rate limits
pub const DEFAULT_PAIR_DELAY: Duration = Duration::from_millis(500);

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pairs scored by the oracle during this run
    pub new_pairs: usize,
    /// Pairs considered, cached or not
    pub total_pairs: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} new of {} total", self.new_pairs, self.total_pairs)
    }
}

/// How much of the pair matrix the stored cache already covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    pub cached: usize,
    pub missing: usize,
    pub total: usize,
}

impl Coverage {
    /// Count cached and missing pairs of `talks` in the stored cache
    pub async fn measure(store: &dyn CacheStore, talks: &[Talk]) -> Result<Self, DomainError> {
        let cache = store.load().await?;
        let mut coverage = Self::default();

        for (i, first) in talks.iter().enumerate() {
            for second in &talks[i + 1..] {
                coverage.total += 1;

                if cache.contains(&PairKey::for_talks(first, second)?) {
                    coverage.cached += 1;
                } else {
                    coverage.missing += 1;
                }
            }
        }

        Ok(coverage)
    }
}

/// Fills the similarity cache for a list of talks.
///
/// The cache is read from the store once at the start of [`run`](Self::run)
/// and written back in full after every new entry, so an interrupted run
/// resumes where it stopped.
pub struct PairwiseScoringService {
    oracle: Arc<dyn SimilarityOracle>,
    store: Arc<dyn CacheStore>,
    sleeper: Arc<dyn Sleeper>,
    pair_delay: Duration,
    cache: SimilarityCache,
}

impl PairwiseScoringService {
    pub fn new(
        oracle: Arc<dyn SimilarityOracle>,
        store: Arc<dyn CacheStore>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            oracle,
            store,
            sleeper,
            pair_delay: DEFAULT_PAIR_DELAY,
            cache: SimilarityCache::new(),
        }
    }

    pub fn with_pair_delay(mut self, delay: Duration) -> Self {
        self.pair_delay = delay;
        self
    }

    /// Cache as of the last run
    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }

    /// Score every pair of `talks` missing from the cache.
    ///
    /// Oracle failures never stop the run; storage failures do.
    pub async fn run(&mut self, talks: &[Talk]) -> Result<RunSummary, DomainError> {
        self.cache = self.store.load().await?;
        info!(
            "Loaded {} cached scores from {}",
            self.cache.len(),
            self.store.location()
        );

        let mut summary = RunSummary::default();

        for (i, first) in talks.iter().enumerate() {
            for second in &talks[i + 1..] {
                summary.total_pairs += 1;

                let key = PairKey::for_talks(first, second)?;
                if self.cache.contains(&key) {
                    continue;
                }

                summary.new_pairs += 1;

                let score = self.oracle.score(first, second).await;
                self.cache.insert(key, score);
                info!("[{}, {}] → {}", first.id(), second.id(), score);

                self.store.save(&self.cache).await?;
                self.sleeper.sleep(self.pair_delay).await;
            }
        }

        info!("Scoring finished: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCacheStore;
    use crate::domain::similarity::{
        MockPairScorer, RecordingSleeper, RetryPolicy, RetryingOracle, Score,
    };
    use crate::domain::TalkId;
    use crate::infrastructure::cache::{InMemoryCacheStore, JsonFileCacheStore};

    fn three_talks() -> Vec<Talk> {
        vec![
            Talk::new(0, "A", Some("x".to_string())),
            Talk::new(1, "B", None),
            Talk::new(2, "C", Some("y".to_string())),
        ]
    }

    fn talks(n: u32) -> Vec<Talk> {
        (0..n)
            .map(|id| Talk::new(id, format!("Talk {}", id), Some(format!("About {}", id))))
            .collect()
    }

    fn cache_from_json(json: &str) -> SimilarityCache {
        serde_json::from_str(json).unwrap()
    }

    struct Harness {
        service: PairwiseScoringService,
        scorer: Arc<MockPairScorer>,
        sleeper: Arc<RecordingSleeper>,
    }

    fn harness(scorer: MockPairScorer, store: Arc<dyn CacheStore>) -> Harness {
        let scorer = Arc::new(scorer);
        let sleeper = Arc::new(RecordingSleeper::new());
        let oracle = Arc::new(RetryingOracle::new(
            scorer.clone(),
            RetryPolicy::default(),
            sleeper.clone(),
        ));
        let service = PairwiseScoringService::new(oracle, store, sleeper.clone());

        Harness {
            service,
            scorer,
            sleeper,
        }
    }

    #[tokio::test]
    async fn test_three_talks_from_empty_cache() {
        let store = Arc::new(InMemoryCacheStore::new());
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), store.clone());

        let summary = h.service.run(&three_talks()).await.unwrap();

        assert_eq!(summary.to_string(), "3 new of 3 total");
        assert_eq!(h.scorer.calls(), 3);
        assert_eq!(
            store.snapshot().unwrap(),
            cache_from_json(r#"{"0_1": 0.7, "0_2": 0.7, "1_2": 0.7}"#)
        );
        assert_eq!(h.service.cache(), &store.snapshot().unwrap());
        assert_eq!(store.save_count(), 3);
        assert_eq!(h.sleeper.sleeps(), vec![DEFAULT_PAIR_DELAY; 3]);
    }

    #[tokio::test]
    async fn test_three_talks_with_prepopulated_cache() {
        let store = Arc::new(InMemoryCacheStore::with_cache(cache_from_json(
            r#"{"0_1": 0.4}"#,
        )));
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), store.clone());

        let summary = h.service.run(&three_talks()).await.unwrap();

        assert_eq!(summary.to_string(), "2 new of 3 total");
        assert_eq!(h.scorer.calls(), 2);
        assert_eq!(
            h.scorer.scored_pairs(),
            vec![
                (TalkId::new(0), TalkId::new(2)),
                (TalkId::new(1), TalkId::new(2))
            ]
        );
        assert_eq!(
            store.snapshot().unwrap(),
            cache_from_json(r#"{"0_1": 0.4, "0_2": 0.7, "1_2": 0.7}"#)
        );
        assert_eq!(h.sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_no_pairs_for_zero_or_one_talk() {
        for n in [0, 1] {
            let store = Arc::new(InMemoryCacheStore::new());
            let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), store.clone());

            let summary = h.service.run(&talks(n)).await.unwrap();

            assert_eq!(summary, RunSummary::default());
            assert_eq!(summary.to_string(), "0 new of 0 total");
            assert_eq!(h.scorer.calls(), 0);
            assert_eq!(store.save_count(), 0);
            assert!(h.sleeper.sleeps().is_empty());
        }
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let store = Arc::new(InMemoryCacheStore::new());

        let mut first = harness(MockPairScorer::new().with_fixed_score(0.5), store.clone());
        let first_summary = first.service.run(&talks(5)).await.unwrap();
        let after_first = store.snapshot().unwrap();

        let mut second = harness(MockPairScorer::new().with_fixed_score(0.9), store.clone());
        let second_summary = second.service.run(&talks(5)).await.unwrap();

        assert_eq!(first_summary.to_string(), "10 new of 10 total");
        assert_eq!(second_summary.to_string(), "0 new of 10 total");
        assert_eq!(second.scorer.calls(), 0);
        assert!(second.sleeper.sleeps().is_empty());
        assert_eq!(store.snapshot().unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_resumes_after_interruption() {
        let reference_store = Arc::new(InMemoryCacheStore::new());
        let mut reference = harness(
            MockPairScorer::new()
                .then_score(0.1)
                .then_score(0.2)
                .then_score(0.3)
                .then_score(0.4)
                .then_score(0.5)
                .then_score(0.6),
            reference_store.clone(),
        );
        reference.service.run(&talks(4)).await.unwrap();
        let complete = reference_store.snapshot().unwrap();

        // Snapshot as it would be on disk after the second pair was saved
        let partial: SimilarityCache = complete.iter().take(2).map(|(k, v)| (*k, *v)).collect();
        let resumed_store = Arc::new(InMemoryCacheStore::with_cache(partial));
        let mut resumed = harness(
            MockPairScorer::new()
                .then_score(0.3)
                .then_score(0.4)
                .then_score(0.5)
                .then_score(0.6),
            resumed_store.clone(),
        );

        let summary = resumed.service.run(&talks(4)).await.unwrap();

        assert_eq!(summary.to_string(), "4 new of 6 total");
        assert_eq!(resumed.scorer.calls(), 4);
        assert_eq!(resumed_store.snapshot().unwrap(), complete);
    }

    #[tokio::test]
    async fn test_failed_pairs_are_stored_as_zero_and_run_continues() {
        let store = Arc::new(InMemoryCacheStore::new());
        let mut h = harness(
            MockPairScorer::new()
                .then_error("timeout")
                .then_error("timeout")
                .then_error("timeout")
                .then_score(1.5)
                .then_score(0.74),
            store.clone(),
        );

        let summary = h.service.run(&three_talks()).await.unwrap();
        let cache = store.snapshot().unwrap();

        assert_eq!(summary.new_pairs, 3);
        assert_eq!(h.scorer.calls(), 5);
        assert_eq!(
            cache,
            cache_from_json(r#"{"0_1": 0.0, "0_2": 0.0, "1_2": 0.7}"#)
        );
        for (_, score) in cache.iter() {
            let v = score.value();
            assert!(Score::in_range(v));
            assert_eq!((v * 10.0).round() / 10.0, v);
        }
    }

    #[tokio::test]
    async fn test_save_failure_halts_run() {
        let mut store = MockCacheStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(SimilarityCache::new()));
        store.expect_location().returning(|| "mock".to_string());
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(DomainError::storage("disk full")));
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), Arc::new(store));

        let result = h.service.run(&three_talks()).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        assert_eq!(h.scorer.calls(), 1);
        assert!(h.sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_halts_before_scoring() {
        let mut store = MockCacheStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Err(DomainError::storage("permission denied")));
        store.expect_save().never();
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), Arc::new(store));

        assert!(h.service.run(&three_talks()).await.is_err());
        assert_eq!(h.scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let store = Arc::new(InMemoryCacheStore::new());
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), store);
        let talks = vec![Talk::new(0, "A", None), Talk::new(0, "A again", None)];

        let result = h.service.run(&talks).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(h.scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_pair_delay() {
        let store = Arc::new(InMemoryCacheStore::new());
        let h = harness(MockPairScorer::new().with_fixed_score(0.7), store);
        let mut service = h.service.with_pair_delay(Duration::from_millis(5));

        service.run(&talks(2)).await.unwrap();

        assert_eq!(h.sleeper.sleeps(), vec![Duration::from_millis(5)]);
    }

    #[tokio::test]
    async fn test_resumes_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity_cache.json");
        std::fs::write(&path, r#"{"0_1": 0.4}"#).unwrap();
        let store = Arc::new(JsonFileCacheStore::new(&path));
        let mut h = harness(MockPairScorer::new().with_fixed_score(0.7), store.clone());

        let summary = h.service.run(&three_talks()).await.unwrap();

        assert_eq!(summary.to_string(), "2 new of 3 total");
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            on_disk,
            "{\n  \"0_1\": 0.4,\n  \"0_2\": 0.7,\n  \"1_2\": 0.7\n}"
        );
    }

    #[tokio::test]
    async fn test_coverage() {
        let store = Arc::new(InMemoryCacheStore::with_cache(cache_from_json(
            r#"{"0_1": 0.4, "2_3": 0.1, "5_9": 0.3}"#,
        )));

        let coverage = Coverage::measure(store.as_ref(), &talks(4)).await.unwrap();

        assert_eq!(
            coverage,
            Coverage {
                cached: 2,
                missing: 4,
                total: 6
            }
        );
        assert_eq!(store.save_count(), 0);
    }
}

//! Single-attempt pair scoring trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::talk::Talk;
use crate::domain::DomainError;

/// Scores a pair of talks in one attempt.
///
/// Returns the raw number the scorer produced, whatever its range. Range
/// checks, rounding and retries belong to the caller.
#[async_trait]
pub trait PairScorer: Send + Sync + Debug {
    async fn score_pair(&self, first: &Talk, second: &Talk) -> Result<f64, DomainError>;

    /// Get the scorer name
    fn scorer_name(&self) -> &'static str;
}


#[cfg(test)]
mod tests {
    use super::mock::MockPairScorer;
    use super::*;

    fn talks() -> (Talk, Talk) {
        (
            Talk::new(0, "A", Some("x".to_string())),
            Talk::new(1, "B", None),
        )
    }

    #[tokio::test]
    async fn test_mock_scorer_replays_script_then_fixed() {
        let scorer = MockPairScorer::new()
            .then_error("timeout")
            .then_score(0.3)
            .with_fixed_score(0.8);
        let (a, b) = talks();

        assert!(scorer.score_pair(&a, &b).await.is_err());
        assert_eq!(scorer.score_pair(&a, &b).await.unwrap(), 0.3);
        assert_eq!(scorer.score_pair(&a, &b).await.unwrap(), 0.8);
        assert_eq!(scorer.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_scorer_without_configuration_errors() {
        let scorer = MockPairScorer::new();
        let (a, b) = talks();

        assert!(scorer.score_pair(&a, &b).await.is_err());
        assert_eq!(scorer.scored_pairs(), vec![(a.id(), b.id())]);
    }
}

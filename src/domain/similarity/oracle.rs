//! Similarity oracle with bounded retries and a zero fallback

use std::sync::Arc;

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

use super::{PairScorer, RetryPolicy, Score, Sleeper, TokioSleeper};
use crate::domain::talk::Talk;

/// Produces a score for every pair; failures degrade to [`Score::ZERO`]
#[async_trait]
pub trait SimilarityOracle: Send + Sync + Debug {
    async fn score(&self, first: &Talk, second: &Talk) -> Score;
}

/// Oracle that retries a [`PairScorer`] on failure.
///
/// A transport or parse failure consumes an attempt and is followed by the
/// policy delay. A value that parses but lies outside `[0.0, 1.0]` ends the
/// pair immediately with a zero score.
#[derive(Debug)]
pub struct RetryingOracle<S>
where
    S: PairScorer,
{
    scorer: Arc<S>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl<S: PairScorer> RetryingOracle<S> {
    pub fn new(scorer: Arc<S>, policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            scorer,
            policy,
            sleeper,
        }
    }

    /// Create with the default policy and the tokio timer
    pub fn with_defaults(scorer: Arc<S>) -> Self {
        Self::new(scorer, RetryPolicy::default(), Arc::new(TokioSleeper))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<S: PairScorer> SimilarityOracle for RetryingOracle<S> {
    async fn score(&self, first: &Talk, second: &Talk) -> Score {
        for attempt in 1..=self.policy.max_attempts {
            match self.scorer.score_pair(first, second).await {
                Ok(raw) => {
                    return match Score::rounded(raw) {
                        Ok(score) => score,
                        Err(_) => {
                            warn!(
                                "Invalid score {} for talks {} and {}",
                                raw,
                                first.id(),
                                second.id()
                            );
                            Score::ZERO
                        }
                    };
                }
                Err(e) => {
                    warn!("Error on attempt {}: {}", attempt, e);

                    if self.policy.has_attempt_after(attempt) {
                        self.sleeper.sleep(self.policy.delay()).await;
                    }
                }
            }
        }

        debug!(
            "Scorer '{}' exhausted {} attempts for talks {} and {}",
            self.scorer.scorer_name(),
            self.policy.max_attempts,
            first.id(),
            second.id()
        );

        Score::ZERO
    }
}

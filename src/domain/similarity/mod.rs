//! Similarity scoring domain
//!
//! A [`PairScorer`] makes a single scoring attempt. A [`SimilarityOracle`]
//! wraps it with the retry and fallback policy and always yields a [`Score`].

mod oracle;
mod retry;
mod score;
mod scorer;
mod sleeper;

pub use oracle::{RetryingOracle, SimilarityOracle};
pub use retry::RetryPolicy;
pub use score::Score;
pub use scorer::PairScorer;
pub use sleeper::{Sleeper, TokioSleeper};

#[cfg(test)]
pub use scorer::mock::MockPairScorer;
#[cfg(test)]
pub use sleeper::mock::RecordingSleeper;

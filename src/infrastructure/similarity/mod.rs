//! Pair scorer implementations

mod llm_scorer;

pub use llm_scorer::{DEFAULT_MODEL, LlmPairScorer, LlmScorerConfig};

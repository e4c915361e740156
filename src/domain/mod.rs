//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod llm;
pub mod similarity;
pub mod talk;

pub use cache::{CacheStore, PairKey, SimilarityCache};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use similarity::{
    PairScorer, RetryPolicy, RetryingOracle, Score, SimilarityOracle, Sleeper, TokioSleeper,
};
pub use talk::{Talk, TalkId, TalkSource};

//! Durable storage for the similarity cache

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::SimilarityCache;
use crate::domain::DomainError;

/// Persists the whole similarity cache as a single document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Loads the stored cache, or an empty one if nothing was stored yet
    async fn load(&self) -> Result<SimilarityCache, DomainError>;

    /// Replaces the stored document with the full contents of `cache`
    async fn save(&self, cache: &SimilarityCache) -> Result<(), DomainError>;

    /// Human-readable location of the store, for reporting
    fn location(&self) -> String;
}

//! Similarity cache domain

mod key;
mod repository;
mod similarity_cache;

pub use key::PairKey;
pub use repository::CacheStore;
pub use similarity_cache::SimilarityCache;

#[cfg(test)]
pub use repository::MockCacheStore;

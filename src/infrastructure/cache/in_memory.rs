//! In-memory cache store

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::{CacheStore, DomainError, SimilarityCache};

/// Cache store that keeps the last saved snapshot in memory
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    snapshot: RwLock<Option<SimilarityCache>>,
    saves: AtomicUsize,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_cache(cache: SimilarityCache) -> Self {
        Self {
            snapshot: RwLock::new(Some(cache)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Last saved snapshot, if any
    pub fn snapshot(&self) -> Option<SimilarityCache> {
        self.snapshot
            .read()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }

    /// Number of saves performed
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn load(&self) -> Result<SimilarityCache, DomainError> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        Ok(snapshot.clone().unwrap_or_default())
    }

    async fn save(&self, cache: &SimilarityCache) -> Result<(), DomainError> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        *snapshot = Some(cache.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

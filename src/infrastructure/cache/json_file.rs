//! JSON file cache store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::{CacheStore, DomainError, SimilarityCache};

/// Stores the similarity cache as one pretty-printed JSON object.
///
/// Every save rewrites the whole document through a sibling temporary file
/// that is synced and then renamed over the target, so readers only ever
/// see a complete snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileCacheStore {
    path: PathBuf,
}

impl JsonFileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cache".to_string());

        self.path.with_file_name(format!(".{}.tmp", file_name))
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::storage(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl CacheStore for JsonFileCacheStore {
    async fn load(&self) -> Result<SimilarityCache, DomainError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error("check", e))?;

        if !exists {
            debug!("No cache at {}, starting empty", self.path.display());
            return Ok(SimilarityCache::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error("read", e))?;

        serde_json::from_str(&content).map_err(|e| {
            DomainError::storage(format!(
                "Invalid cache document {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, cache: &SimilarityCache) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(cache)
            .map_err(|e| DomainError::storage(format!("Failed to serialize cache: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", e))?;
        }

        let temp_path = self.temp_path();
        {
            let mut file = tokio::fs::File::create(&temp_path)
                .await
                .map_err(|e| self.io_error("create temporary file for", e))?;
            file.write_all(json.as_bytes())
                .await
                .map_err(|e| self.io_error("write", e))?;
            file.sync_all()
                .await
                .map_err(|e| self.io_error("sync", e))?;
        }

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_error("replace", e))?;

        debug!("Saved {} cache entries to {}", cache.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

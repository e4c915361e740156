use async_trait::async_trait;
use std::fmt::Debug;

use super::Talk;
use crate::domain::DomainError;

/// Source of the talks to be scored.
///
/// Implementations must return talks ordered by id, with ids dense from zero.
/// The scoring service relies on that ordering and does not re-check it.
#[async_trait]
pub trait TalkSource: Send + Sync + Debug {
    /// Load every talk in id order
    async fn load(&self) -> Result<Vec<Talk>, DomainError>;

    /// Get the source name for logging
    fn source_name(&self) -> &'static str;
}

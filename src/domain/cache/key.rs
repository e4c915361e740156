//! Pair key for the similarity cache

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::talk::{Talk, TalkId};
use crate::domain::DomainError;

/// Key of an unordered pair of distinct talks.
///
/// The smaller id always comes first, so a pair has exactly one key and the
/// reversed form can never be built. Serialized as `"{low}_{high}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairKey {
    low: TalkId,
    high: TalkId,
}

impl PairKey {
    /// Build the canonical key for two talk ids
    pub fn new(a: TalkId, b: TalkId) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::validation(format!(
                "Cannot build a pair key from talk {} with itself",
                a
            )));
        }

        Ok(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn for_talks(first: &Talk, second: &Talk) -> Result<Self, DomainError> {
        Self::new(first.id(), second.id())
    }

    pub fn low(&self) -> TalkId {
        self.low
    }

    pub fn high(&self) -> TalkId {
        self.high
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.low, self.high)
    }
}

impl FromStr for PairKey {
    type Err = DomainError;

    /// Parse a key in canonical form only; `"2_1"` is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("Invalid pair key: '{}'", s));

        let (low, high) = s.split_once('_').ok_or_else(invalid)?;
        let low: u32 = low.parse().map_err(|_| invalid())?;
        let high: u32 = high.parse().map_err(|_| invalid())?;

        if low >= high {
            return Err(invalid());
        }

        Ok(Self {
            low: TalkId::new(low),
            high: TalkId::new(high),
        })
    }
}

impl TryFrom<String> for PairKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PairKey> for String {
    fn from(key: PairKey) -> Self {
        key.to_string()
    }
}

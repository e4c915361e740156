//! In-memory similarity cache with insertion order

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::PairKey;
use crate::domain::similarity::Score;

/// Mapping from pair key to score.
///
/// Entries are append-only: once a key is present its score never changes.
/// Iteration and serialization follow insertion order, and a deserialized
/// cache keeps the order of the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityCache {
    entries: Vec<(PairKey, Score)>,
    index: HashMap<PairKey, usize>,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &PairKey) -> Option<Score> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    /// Insert a new entry. Returns `false`, leaving the cache untouched, if
    /// the key is already present.
    pub fn insert(&mut self, key: PairKey, score: Score) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        self.index.insert(key, self.entries.len());
        self.entries.push((key, score));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &Score)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(PairKey, Score)> for SimilarityCache {
    fn from_iter<I: IntoIterator<Item = (PairKey, Score)>>(iter: I) -> Self {
        let mut cache = Self::new();
        for (key, score) in iter {
            cache.insert(key, score);
        }
        cache
    }
}

impl Serialize for SimilarityCache {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, score) in &self.entries {
            map.serialize_entry(key, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SimilarityCache {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CacheVisitor;

        impl<'de> Visitor<'de> for CacheVisitor {
            type Value = SimilarityCache;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of \"<id>_<id>\" keys to scores in [0.0, 1.0]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut cache = SimilarityCache::new();
                while let Some((key, score)) = access.next_entry::<PairKey, Score>()? {
                    if !cache.insert(key, score) {
                        return Err(de::Error::custom(format!("duplicate pair key '{}'", key)));
                    }
                }
                Ok(cache)
            }
        }

        deserializer.deserialize_map(CacheVisitor)
    }
}

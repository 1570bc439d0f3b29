//! Cache region contract and the in-memory reference region.

use crate::key::CollectionCacheKey;
use hydromap_core::{Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The cached snapshot of one collection: the identifiers of its members.
///
/// Members are identifier values, not entity data; entity slices are cached
/// separately by the entity regions upstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionCacheEntry {
    /// Identifier of each collection member, in collection order
    pub members: Vec<Value>,
}

impl CollectionCacheEntry {
    /// Create an entry from member identifiers.
    pub fn new(members: Vec<Value>) -> Self {
        Self { members }
    }

    /// Number of members in the snapshot.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A key-value store holding cached collection snapshots.
///
/// Regions are the shared resource between sessions and processes; an
/// implementation owns its own locking and versioning. This layer only
/// guarantees transaction-boundary ordering of puts and evicts.
pub trait CacheRegion {
    /// Upsert an entry. The persistence format is region-defined.
    fn put(&mut self, key: CollectionCacheKey, entry: CollectionCacheEntry) -> Result<()>;

    /// Look up an entry.
    fn get(&self, key: &CollectionCacheKey) -> Option<CollectionCacheEntry>;

    /// Remove any entry for the key. Idempotent.
    fn evict(&mut self, key: &CollectionCacheKey) -> Result<()>;
}

/// HashMap-backed region for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryRegion {
    entries: HashMap<CollectionCacheKey, CollectionCacheEntry>,
}

impl MemoryRegion {
    /// Create an empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the region holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CacheRegion for MemoryRegion {
    fn put(&mut self, key: CollectionCacheKey, entry: CollectionCacheEntry) -> Result<()> {
        self.entries.insert(key, entry);
        Ok(())
    }

    fn get(&self, key: &CollectionCacheKey) -> Option<CollectionCacheEntry> {
        self.entries.get(key).cloned()
    }

    fn evict(&mut self, key: &CollectionCacheKey) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(owner: i64) -> CollectionCacheKey {
        CollectionCacheKey::new("Team", "heroes", vec![Value::BigInt(owner)])
    }

    #[test]
    fn put_get_evict_roundtrip() {
        let mut region = MemoryRegion::new();
        let entry = CollectionCacheEntry::new(vec![Value::BigInt(10), Value::BigInt(11)]);

        region.put(key(1), entry.clone()).unwrap();
        assert_eq!(region.get(&key(1)), Some(entry));
        assert_eq!(region.len(), 1);

        region.evict(&key(1)).unwrap();
        assert_eq!(region.get(&key(1)), None);
        assert!(region.is_empty());
    }

    #[test]
    fn evict_is_idempotent() {
        let mut region = MemoryRegion::new();
        region.evict(&key(9)).unwrap();
        region.evict(&key(9)).unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn put_upserts() {
        let mut region = MemoryRegion::new();
        region
            .put(key(1), CollectionCacheEntry::new(vec![Value::BigInt(1)]))
            .unwrap();
        region
            .put(key(1), CollectionCacheEntry::new(vec![Value::BigInt(2)]))
            .unwrap();
        assert_eq!(region.len(), 1);
        assert_eq!(region.get(&key(1)).unwrap().members, vec![Value::BigInt(2)]);
    }
}

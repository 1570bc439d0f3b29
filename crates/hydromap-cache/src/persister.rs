//! Non-strict read/write cached collection persister.
//!
//! Decorates a plain collection persister so that cached collection state
//! stays consistent with database writes. Cache mutations are queued while a
//! transaction is open and only flushed to the region once the transaction
//! completes; a rollback discards the queue. The non-strict policy accepts a
//! brief staleness window instead of locking the region on every write.

use crate::key::CollectionCacheKey;
use crate::region::{CacheRegion, CollectionCacheEntry};
use hydromap_core::{Result, Value};
use std::collections::HashMap;

/// Transaction-scoped handle identifying one in-memory collection instance.
///
/// Two collection instances for the same cache key must not collide while a
/// transaction is open, so pending operations are keyed by instance handle
/// rather than by cache key. Handles come from a [`CollectionIdAllocator`]
/// owned by the session that tracks the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(u64);

/// Allocates monotonically increasing collection handles.
#[derive(Debug, Default)]
pub struct CollectionIdAllocator {
    next: u64,
}

impl CollectionIdAllocator {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next collection handle.
    pub fn allocate(&mut self) -> CollectionId {
        let id = CollectionId(self.next);
        self.next += 1;
        id
    }
}

/// Opaque reference to the entity owning a collection.
///
/// The identity layer that manages entities hands these out and resolves
/// them back to identifier values through [`IdentityResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerRef(pub u64);

/// The capability surface a persistent collection exposes to this layer.
pub trait TrackedCollection {
    /// The transaction-scoped handle for this collection instance.
    fn id(&self) -> CollectionId;

    /// Whether the collection's full contents have been fetched from storage.
    fn is_initialized(&self) -> bool;

    /// Whether the collection has local changes not yet written.
    fn is_dirty(&self) -> bool;

    /// The entity owning this collection.
    fn owner(&self) -> OwnerRef;

    /// The identifiers of the current members, in collection order.
    fn snapshot(&self) -> Vec<Value>;
}

/// The slice of the identity/unit-of-work collaborator this layer consumes.
pub trait IdentityResolver {
    /// Resolve an owner reference to its identifier values.
    fn entity_identifier(&self, owner: OwnerRef) -> Result<Vec<Value>>;
}

/// The underlying persister that performs the real INSERT/UPDATE/DELETE.
pub trait CollectionPersister {
    /// Write the collection's pending changes to the database.
    fn update(&mut self, collection: &dyn TrackedCollection) -> Result<()>;

    /// Delete the collection from the database.
    fn delete(&mut self, collection: &dyn TrackedCollection) -> Result<()>;
}

/// Mapping metadata for the association a persister instance serves.
#[derive(Debug, Clone)]
pub struct AssociationMeta {
    /// Root entity type name of the owning side
    pub root_entity: String,
    /// Association field name on the owner
    pub field_name: String,
    /// Whether the association carries an explicit ORDER BY clause
    pub ordered: bool,
}

impl AssociationMeta {
    /// Metadata for an unordered association.
    pub fn new(root_entity: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            root_entity: root_entity.into(),
            field_name: field_name.into(),
            ordered: false,
        }
    }

    /// Mark the association as explicitly ordered.
    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }
}

/// One queued cache write, consumed at transaction completion.
#[derive(Debug)]
struct QueuedUpdate {
    key: CollectionCacheKey,
    snapshot: CollectionCacheEntry,
}

/// Counts of operations waiting for the transaction boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCacheOps {
    /// Snapshots queued for storing
    pub updates: usize,
    /// Keys queued for eviction
    pub deletes: usize,
}

impl PendingCacheOps {
    /// Check if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.updates == 0 && self.deletes == 0
    }
}

/// Collection persister decorator applying the non-strict read/write policy.
///
/// Every write first goes through the underlying persister; only after the
/// delegate succeeds is a cache operation queued. The queue lives for one
/// transaction: `after_transaction_complete` flushes it into the region,
/// `after_transaction_rolled_back` discards it.
pub struct NonStrictReadWriteCollectionPersister<P, R, U> {
    persister: P,
    region: R,
    resolver: U,
    association: AssociationMeta,
    queued_updates: HashMap<CollectionId, QueuedUpdate>,
    queued_deletes: HashMap<CollectionId, CollectionCacheKey>,
}

impl<P, R, U> NonStrictReadWriteCollectionPersister<P, R, U>
where
    P: CollectionPersister,
    R: CacheRegion,
    U: IdentityResolver,
{
    /// Wrap an underlying persister for one association.
    pub fn new(persister: P, region: R, resolver: U, association: AssociationMeta) -> Self {
        Self {
            persister,
            region,
            resolver,
            association,
            queued_updates: HashMap::new(),
            queued_deletes: HashMap::new(),
        }
    }

    fn collection_key(&self, collection: &dyn TrackedCollection) -> Result<CollectionCacheKey> {
        let owner_id = self.resolver.entity_identifier(collection.owner())?;
        Ok(CollectionCacheKey::new(
            self.association.root_entity.clone(),
            self.association.field_name.clone(),
            owner_id,
        ))
    }

    /// Write a collection's changes and queue the matching cache operation.
    ///
    /// Untouched lazy collections (neither initialized nor dirty) are a
    /// complete no-op. Partially loaded dirty collections and ordered
    /// associations cannot be represented by an incremental snapshot, so
    /// their cache entry is queued for invalidation instead.
    pub fn update(&mut self, collection: &dyn TrackedCollection) -> Result<()> {
        let initialized = collection.is_initialized();
        let dirty = collection.is_dirty();

        if !initialized && !dirty {
            return Ok(());
        }

        let key = self.collection_key(collection)?;

        if (dirty && !initialized) || self.association.ordered {
            self.persister.update(collection)?;

            tracing::debug!(
                entity = %key.entity_name(),
                field = %key.field(),
                "queueing collection cache invalidation"
            );
            self.queued_deletes.insert(collection.id(), key);
            return Ok(());
        }

        self.persister.update(collection)?;

        let snapshot = CollectionCacheEntry::new(collection.snapshot());
        tracing::debug!(
            entity = %key.entity_name(),
            field = %key.field(),
            members = snapshot.len(),
            "queueing collection cache update"
        );
        self.queued_updates
            .insert(collection.id(), QueuedUpdate { key, snapshot });
        Ok(())
    }

    /// Delete a collection and queue the eviction of its cache entry.
    pub fn delete(&mut self, collection: &dyn TrackedCollection) -> Result<()> {
        let key = self.collection_key(collection)?;

        self.persister.delete(collection)?;

        tracing::debug!(
            entity = %key.entity_name(),
            field = %key.field(),
            "queueing collection cache eviction after delete"
        );
        self.queued_deletes.insert(collection.id(), key);
        Ok(())
    }

    /// Flush the queue into the region after the transaction committed.
    ///
    /// Region failures are logged and skipped: a stale or missing cache
    /// entry is recoverable, a queue leaking into the next transaction is
    /// not, so the queue is cleared unconditionally.
    pub fn after_transaction_complete(&mut self) {
        for (_, queued) in self.queued_updates.drain() {
            if let Err(err) = self.region.put(queued.key, queued.snapshot) {
                tracing::warn!(error = %err, "collection cache store failed; entry dropped");
            }
        }

        for (_, key) in self.queued_deletes.drain() {
            if let Err(err) = self.region.evict(&key) {
                tracing::warn!(error = %err, "collection cache eviction failed");
            }
        }
    }

    /// Discard the queue after a rollback. No cache mutation happens.
    pub fn after_transaction_rolled_back(&mut self) {
        self.queued_updates.clear();
        self.queued_deletes.clear();
    }

    /// Counts of queued operations, for inspection.
    pub fn pending(&self) -> PendingCacheOps {
        PendingCacheOps {
            updates: self.queued_updates.len(),
            deletes: self.queued_deletes.len(),
        }
    }

    /// Access the cache region.
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Access the underlying persister.
    pub fn persister(&self) -> &P {
        &self.persister
    }
}

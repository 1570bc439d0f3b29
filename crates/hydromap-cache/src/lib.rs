//! Second-level collection cache coordination for hydromap.
//!
//! `hydromap-cache` keeps a cross-session cache of collection state
//! consistent with writes performed inside ongoing transactions:
//!
//! - **Cache keys/entries**: structured, value-equal identifiers for cached
//!   collections and their member-id snapshots.
//! - **Cache region**: the key-value contract a storage backend implements,
//!   plus an in-memory reference region.
//! - **Persister decorator**: wraps a plain collection persister, queues
//!   cache mutations per transaction, flushes on commit, discards on
//!   rollback (non-strict read/write policy).
//!
//! # Example
//!
//! ```ignore
//! let mut persister = NonStrictReadWriteCollectionPersister::new(
//!     sql_persister,
//!     MemoryRegion::new(),
//!     unit_of_work,
//!     AssociationMeta::new("Team", "heroes"),
//! );
//!
//! persister.update(&heroes)?;          // delegate write + queue
//! persister.after_transaction_complete(); // flush queue into the region
//! ```

pub mod key;
pub mod persister;
pub mod region;

pub use key::CollectionCacheKey;
pub use persister::{
    AssociationMeta, CollectionId, CollectionIdAllocator, CollectionPersister, IdentityResolver,
    NonStrictReadWriteCollectionPersister, OwnerRef, PendingCacheOps, TrackedCollection,
};
pub use region::{CacheRegion, CollectionCacheEntry, MemoryRegion};

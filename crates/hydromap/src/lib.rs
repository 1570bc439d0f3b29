//! Hydromap - second-level collection cache and row hydration for ORM layers.
//!
//! Hydromap provides the two data-plane pieces an ORM needs between its
//! query layer and its identity map:
//!
//! - A **collection cache persister** implementing the non-strict
//!   read/write policy: cache mutations are queued per transaction,
//!   flushed into the shared cache region on commit, and discarded on
//!   rollback.
//! - A **row hydrator** for result sets that select exactly one object
//!   type: streaming rows become entity field maps, with declared-type
//!   conversion and discriminator-based subtype dispatch.
//!
//! # Quick Start
//!
//! ```ignore
//! use hydromap::prelude::*;
//!
//! // Hydration: describe the result set, then stream rows through.
//! let rsm = ResultSetMapping::new()
//!     .add_entity("p", "Person")
//!     .add_typed_field("id", "id", SqlType::BigInt)
//!     .add_field("name", "name");
//!
//! let mut hydrator = SimpleEntityHydrator::new(rsm, meta, platform)?;
//! let entities = hydrator.hydrate_all(&mut rows, &mut sink, &HydrationHints::new())?;
//!
//! // Caching: wrap the SQL persister, flush on commit.
//! let mut persister = NonStrictReadWriteCollectionPersister::new(
//!     sql_persister,
//!     MemoryRegion::new(),
//!     resolver,
//!     AssociationMeta::new("Team", "members"),
//! );
//! persister.update(&members)?;
//! persister.after_transaction_complete();
//! ```

pub use hydromap_core::{
    convert_to_domain, hash_values, ColumnInfo, ConfigError, DiscriminatorInfo, EntityMeta, Error,
    HydrationError, HydrationErrorKind, MemoryRowSource, Platform, RegionError, RegionErrorKind,
    Result, ResultCasing, Row, RowSource, SqlType, TypeError, Value, WriteError,
};

pub use hydromap_cache::{
    AssociationMeta, CacheRegion, CollectionCacheEntry, CollectionCacheKey, CollectionId,
    CollectionIdAllocator, CollectionPersister, IdentityResolver, MemoryRegion,
    NonStrictReadWriteCollectionPersister, OwnerRef, PendingCacheOps, TrackedCollection,
};

pub use hydromap_hydrate::{
    FieldMap, FieldMapping, HydrationHints, HydrationSink, ResultSetMapping, SimpleEntityHydrator,
};

/// Common imports for working with hydromap.
pub mod prelude {
    pub use crate::{
        AssociationMeta, CacheRegion, CollectionCacheEntry, CollectionCacheKey, EntityMeta, Error,
        FieldMap, HydrationHints, HydrationSink, IdentityResolver, MemoryRegion,
        NonStrictReadWriteCollectionPersister, Platform, Result, ResultCasing, ResultSetMapping,
        Row, RowSource, SimpleEntityHydrator, SqlType, TrackedCollection, Value,
    };
}

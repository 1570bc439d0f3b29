use hydromap::prelude::*;
use hydromap::{CollectionId, CollectionIdAllocator, CollectionPersister, OwnerRef};
use std::cell::RefCell;
use std::rc::Rc;

/// A collection the session tracks across one transaction.
struct HeroList {
    id: CollectionId,
    owner: OwnerRef,
    initialized: bool,
    dirty: bool,
    members: Vec<Value>,
}

impl TrackedCollection for HeroList {
    fn id(&self) -> CollectionId {
        self.id
    }
    fn is_initialized(&self) -> bool {
        self.initialized
    }
    fn is_dirty(&self) -> bool {
        self.dirty
    }
    fn owner(&self) -> OwnerRef {
        self.owner
    }
    fn snapshot(&self) -> Vec<Value> {
        self.members.clone()
    }
}

/// SQL-side persister stand-in logging the write order.
#[derive(Default)]
struct LoggingPersister {
    log: Rc<RefCell<Vec<String>>>,
}

impl CollectionPersister for LoggingPersister {
    fn update(&mut self, collection: &dyn TrackedCollection) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("update owner={}", collection.owner().0));
        Ok(())
    }

    fn delete(&mut self, collection: &dyn TrackedCollection) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("delete owner={}", collection.owner().0));
        Ok(())
    }
}

/// Owners resolve to a single big-integer identifier.
struct DirectResolver;

impl IdentityResolver for DirectResolver {
    fn entity_identifier(&self, owner: OwnerRef) -> Result<Vec<Value>> {
        Ok(vec![Value::BigInt(i64::try_from(owner.0).expect("small id"))])
    }
}

fn hero_list(ids: &mut CollectionIdAllocator, owner: u64, members: &[i64]) -> HeroList {
    HeroList {
        id: ids.allocate(),
        owner: OwnerRef(owner),
        initialized: true,
        dirty: true,
        members: members.iter().copied().map(Value::BigInt).collect(),
    }
}

fn key_for(owner: i64) -> CollectionCacheKey {
    CollectionCacheKey::new("Team", "heroes", vec![Value::BigInt(owner)])
}

#[test]
fn commit_makes_snapshots_visible_across_sessions() {
    let mut ids = CollectionIdAllocator::new();
    let mut persister = NonStrictReadWriteCollectionPersister::new(
        LoggingPersister::default(),
        MemoryRegion::new(),
        DirectResolver,
        AssociationMeta::new("Team", "heroes"),
    );

    let avengers = hero_list(&mut ids, 1, &[10, 11, 12]);
    let x_men = hero_list(&mut ids, 2, &[20]);
    persister.update(&avengers).unwrap();
    persister.update(&x_men).unwrap();

    // Nothing is visible in the shared region until the commit boundary.
    assert_eq!(persister.region().get(&key_for(1)), None);
    assert_eq!(persister.pending().updates, 2);

    persister.after_transaction_complete();

    let entry = persister.region().get(&key_for(1)).unwrap();
    assert_eq!(
        entry.members,
        vec![Value::BigInt(10), Value::BigInt(11), Value::BigInt(12)]
    );
    assert_eq!(persister.region().get(&key_for(2)).unwrap().len(), 1);
    assert!(persister.pending().is_empty());
}

#[test]
fn rollback_leaves_the_region_untouched() {
    let mut ids = CollectionIdAllocator::new();
    let mut persister = NonStrictReadWriteCollectionPersister::new(
        LoggingPersister::default(),
        MemoryRegion::new(),
        DirectResolver,
        AssociationMeta::new("Team", "heroes"),
    );

    persister.update(&hero_list(&mut ids, 1, &[10])).unwrap();
    persister.after_transaction_rolled_back();

    assert!(persister.pending().is_empty());
    assert_eq!(persister.region().get(&key_for(1)), None);

    // The next transaction starts from a clean queue.
    persister.update(&hero_list(&mut ids, 1, &[10, 11])).unwrap();
    persister.after_transaction_complete();
    assert_eq!(persister.region().get(&key_for(1)).unwrap().len(), 2);
}

#[test]
fn delete_then_commit_evicts_a_previously_cached_entry() {
    let mut ids = CollectionIdAllocator::new();
    let mut persister = NonStrictReadWriteCollectionPersister::new(
        LoggingPersister::default(),
        MemoryRegion::new(),
        DirectResolver,
        AssociationMeta::new("Team", "heroes"),
    );

    persister.update(&hero_list(&mut ids, 1, &[10])).unwrap();
    persister.after_transaction_complete();
    assert!(persister.region().get(&key_for(1)).is_some());

    persister.delete(&hero_list(&mut ids, 1, &[10])).unwrap();
    persister.after_transaction_complete();
    assert_eq!(persister.region().get(&key_for(1)), None);
}

#[test]
fn ordered_association_invalidates_instead_of_caching() {
    let mut ids = CollectionIdAllocator::new();
    let mut persister = NonStrictReadWriteCollectionPersister::new(
        LoggingPersister::default(),
        MemoryRegion::new(),
        DirectResolver,
        AssociationMeta::new("Team", "heroes").ordered(),
    );

    persister.update(&hero_list(&mut ids, 1, &[10])).unwrap();
    persister.after_transaction_complete();

    // The database write happened, but no snapshot was cached.
    assert_eq!(persister.region().get(&key_for(1)), None);
}

#[test]
fn database_writes_happen_immediately_cache_writes_wait() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut ids = CollectionIdAllocator::new();
    let mut persister = NonStrictReadWriteCollectionPersister::new(
        LoggingPersister { log: Rc::clone(&log) },
        MemoryRegion::new(),
        DirectResolver,
        AssociationMeta::new("Team", "heroes"),
    );

    persister.update(&hero_list(&mut ids, 1, &[10])).unwrap();
    assert_eq!(log.borrow().as_slice(), ["update owner=1"]);
    assert_eq!(persister.region().get(&key_for(1)), None);

    persister.after_transaction_complete();
    // Commit touches the cache only; no further SQL writes.
    assert_eq!(log.borrow().len(), 1);
    assert!(persister.region().get(&key_for(1)).is_some());
}

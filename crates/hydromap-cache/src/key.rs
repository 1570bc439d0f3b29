//! Structured cache keys.

use hydromap_core::{hash_values, Value};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Identifies one cached collection: the owning root entity type, the
/// association field, and the owner's identifier.
///
/// Keys are immutable values with value-based equality, usable as map keys
/// in any region implementation. Float identifiers hash by bit pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCacheKey {
    /// Root entity type name of the collection's owner
    entity_name: String,
    /// Association field name on the owner
    field: String,
    /// Owner identifier values (composite keys are multi-valued)
    owner_id: Vec<Value>,
}

impl CollectionCacheKey {
    /// Create a key for the given owner/association pair.
    pub fn new(
        entity_name: impl Into<String>,
        field: impl Into<String>,
        owner_id: Vec<Value>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            field: field.into(),
            owner_id,
        }
    }

    /// The owning root entity type name.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// The association field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The owner identifier values.
    pub fn owner_id(&self) -> &[Value] {
        &self.owner_id
    }
}

impl Eq for CollectionCacheKey {}

impl Hash for CollectionCacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_name.hash(state);
        self.field.hash(state);
        hash_values(&self.owner_id).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn key(owner: i64) -> CollectionCacheKey {
        CollectionCacheKey::new("Team", "heroes", vec![Value::BigInt(owner)])
    }

    #[test]
    fn value_based_equality() {
        assert_eq!(key(1), key(1));
        assert_ne!(key(1), key(2));
        assert_ne!(
            key(1),
            CollectionCacheKey::new("Team", "powers", vec![Value::BigInt(1)])
        );
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(key(1), "a");
        map.insert(key(2), "b");
        assert_eq!(map.get(&key(1)), Some(&"a"));
        assert_eq!(map.insert(key(1), "c"), Some("a"));
    }

    #[test]
    fn composite_owner_ids() {
        let a = CollectionCacheKey::new(
            "Order",
            "lines",
            vec![Value::BigInt(1), Value::Text("eu".to_string())],
        );
        let b = CollectionCacheKey::new(
            "Order",
            "lines",
            vec![Value::BigInt(1), Value::Text("us".to_string())],
        );
        assert_ne!(a, b);
    }
}

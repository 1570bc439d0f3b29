//! Entity metadata consumed by the hydrator.
//!
//! Only the slice of class metadata this layer needs: the entity name and,
//! for polymorphic entities, the discriminator column and the map from
//! discriminator values to concrete entity names. Full mapping configuration
//! lives in the metadata layer upstream.

use crate::error::{ConfigError, Error, Result};
use std::collections::HashMap;

/// Discriminator configuration for an entity mapped with inheritance.
#[derive(Debug, Clone)]
pub struct DiscriminatorInfo {
    /// The column whose value selects the concrete subtype
    column: String,
    /// Discriminator value -> concrete entity name
    map: HashMap<String, String>,
}

impl DiscriminatorInfo {
    /// Create discriminator info; the map must not be empty.
    pub fn new(
        column: impl Into<String>,
        map: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Result<Self> {
        let map: HashMap<String, String> = map
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if map.is_empty() {
            return Err(Error::Config(ConfigError {
                message: "a discriminator map must contain at least one value".to_string(),
            }));
        }
        Ok(Self {
            column: column.into(),
            map,
        })
    }

    /// The discriminator column name as mapped.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Resolve a discriminator value to its concrete entity name.
    pub fn resolve(&self, value: &str) -> Option<&str> {
        self.map.get(value).map(String::as_str)
    }

    /// All known discriminator values, sorted for stable diagnostics.
    pub fn known_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.map.keys().map(String::as_str).collect();
        values.sort_unstable();
        values
    }
}

/// The entity metadata slice the hydrator works from.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    /// Entity (root) type name
    entity_name: String,
    /// Present iff the entity participates in an inheritance hierarchy
    discriminator: Option<DiscriminatorInfo>,
}

impl EntityMeta {
    /// Metadata for an entity without inheritance.
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            discriminator: None,
        }
    }

    /// Metadata for a polymorphic entity.
    pub fn with_discriminator(
        entity_name: impl Into<String>,
        discriminator: DiscriminatorInfo,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            discriminator: Some(discriminator),
        }
    }

    /// The entity type name.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Whether this entity uses inheritance.
    pub fn has_inheritance(&self) -> bool {
        self.discriminator.is_some()
    }

    /// The discriminator configuration, if any.
    pub fn discriminator(&self) -> Option<&DiscriminatorInfo> {
        self.discriminator.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_discriminator_map_is_rejected() {
        let empty: Vec<(&str, &str)> = vec![];
        let err = DiscriminatorInfo::new("discr", empty).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn resolves_known_values() {
        let info =
            DiscriminatorInfo::new("kind", [("emp", "Employee"), ("mgr", "Manager")]).unwrap();
        assert_eq!(info.resolve("emp"), Some("Employee"));
        assert_eq!(info.resolve("ceo"), None);
        assert_eq!(info.known_values(), vec!["emp", "mgr"]);
    }

    #[test]
    fn plain_entity_has_no_inheritance() {
        let meta = EntityMeta::new("Address");
        assert_eq!(meta.entity_name(), "Address");
        assert!(!meta.has_inheritance());
        assert!(meta.discriminator().is_none());
    }
}

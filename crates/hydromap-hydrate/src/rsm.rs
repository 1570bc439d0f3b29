//! Result-set mapping.
//!
//! Describes how the columns of a raw result set map onto entities, fields,
//! scalars, and meta columns. Built by the query layer upstream; consumed by
//! the hydrators.

use hydromap_core::SqlType;
use std::collections::{HashMap, HashSet};

/// How one result column maps onto an entity field.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// Target field name on the entity
    pub field_name: String,
    /// Declared type driving raw-to-domain conversion; pass-through if unset
    pub sql_type: Option<SqlType>,
    /// Discriminator values for which this column is valid. Used when
    /// subclasses in one inheritance layout declare same-named fields;
    /// unset means the column applies to every subtype.
    pub declared_by: Option<HashSet<String>>,
}

/// A description of one result set's shape.
#[derive(Debug, Clone, Default)]
pub struct ResultSetMapping {
    /// (alias, entity name) per selected object
    entities: Vec<(String, String)>,
    /// Columns selected as plain scalars
    scalars: Vec<String>,
    /// Result column -> field mapping
    fields: HashMap<String, FieldMapping>,
    /// Result column -> mapped meta column (discriminators, foreign keys)
    meta: HashMap<String, String>,
    /// Result columns that belong to a joined association
    relations: HashSet<String>,
}

impl ResultSetMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object result under an alias.
    #[must_use]
    pub fn add_entity(mut self, alias: impl Into<String>, entity_name: impl Into<String>) -> Self {
        self.entities.push((alias.into(), entity_name.into()));
        self
    }

    /// Map a result column to an entity field without type conversion.
    #[must_use]
    pub fn add_field(mut self, column: impl Into<String>, field_name: impl Into<String>) -> Self {
        self.fields.insert(
            column.into(),
            FieldMapping {
                field_name: field_name.into(),
                sql_type: None,
                declared_by: None,
            },
        );
        self
    }

    /// Map a result column to an entity field with a declared type.
    #[must_use]
    pub fn add_typed_field(
        mut self,
        column: impl Into<String>,
        field_name: impl Into<String>,
        sql_type: SqlType,
    ) -> Self {
        self.fields.insert(
            column.into(),
            FieldMapping {
                field_name: field_name.into(),
                sql_type: Some(sql_type),
                declared_by: None,
            },
        );
        self
    }

    /// Restrict a mapped column to specific discriminator values.
    ///
    /// Columns without a scope apply to every subtype. Scoping an unmapped
    /// column is a no-op.
    #[must_use]
    pub fn scope_field<I, S>(mut self, column: &str, discriminator_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(mapping) = self.fields.get_mut(column) {
            mapping.declared_by = Some(
                discriminator_values
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            );
        }
        self
    }

    /// Add a scalar result column.
    #[must_use]
    pub fn add_scalar(mut self, column: impl Into<String>) -> Self {
        self.scalars.push(column.into());
        self
    }

    /// Record a meta-column rename: the result column under which a mapped
    /// meta column (discriminator, foreign key) actually appears.
    #[must_use]
    pub fn add_meta(
        mut self,
        result_column: impl Into<String>,
        mapped_column: impl Into<String>,
    ) -> Self {
        self.meta.insert(result_column.into(), mapped_column.into());
        self
    }

    /// Mark a result column as belonging to a joined association.
    #[must_use]
    pub fn add_relation(mut self, column: impl Into<String>) -> Self {
        self.relations.insert(column.into());
        self
    }

    /// Number of object results in this mapping.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The first (alias, entity name) pair, if any.
    pub fn first_entity(&self) -> Option<(&str, &str)> {
        self.entities
            .first()
            .map(|(alias, name)| (alias.as_str(), name.as_str()))
    }

    /// Whether any scalar columns are mapped.
    pub fn has_scalars(&self) -> bool {
        !self.scalars.is_empty()
    }

    /// The field mapping for a result column, if any.
    pub fn field(&self, column: &str) -> Option<&FieldMapping> {
        self.fields.get(column)
    }

    /// Whether a result column belongs to a joined association.
    pub fn is_relation(&self, column: &str) -> bool {
        self.relations.contains(column)
    }

    /// Reverse meta lookup: the result column a mapped meta column was
    /// renamed to, if a rename was recorded.
    pub fn meta_alias_of(&self, mapped_column: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|(_, mapped)| mapped.as_str() == mapped_column)
            .map(|(result_column, _)| result_column.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_mappings() {
        let rsm = ResultSetMapping::new()
            .add_entity("p", "Person")
            .add_typed_field("id", "id", SqlType::BigInt)
            .add_field("name", "name")
            .add_scalar("cnt");

        assert_eq!(rsm.entity_count(), 1);
        assert_eq!(rsm.first_entity(), Some(("p", "Person")));
        assert!(rsm.has_scalars());
        assert_eq!(rsm.field("id").unwrap().sql_type, Some(SqlType::BigInt));
        assert!(rsm.field("name").unwrap().sql_type.is_none());
        assert!(rsm.field("missing").is_none());
    }

    #[test]
    fn scoping_restricts_to_discriminator_values() {
        let rsm = ResultSetMapping::new()
            .add_field("salary", "salary")
            .scope_field("salary", ["emp"]);

        let scope = rsm.field("salary").unwrap().declared_by.as_ref().unwrap();
        assert!(scope.contains("emp"));
        assert!(!scope.contains("mgr"));
    }

    #[test]
    fn scoping_an_unmapped_column_is_a_no_op() {
        let rsm = ResultSetMapping::new().scope_field("ghost", ["emp"]);
        assert!(rsm.field("ghost").is_none());
    }

    #[test]
    fn meta_alias_reverse_lookup() {
        let rsm = ResultSetMapping::new().add_meta("discr_0", "discr");
        assert_eq!(rsm.meta_alias_of("discr"), Some("discr_0"));
        assert_eq!(rsm.meta_alias_of("other"), None);
    }

    #[test]
    fn relation_columns_are_flagged() {
        let rsm = ResultSetMapping::new().add_relation("team_id");
        assert!(rsm.is_relation("team_id"));
        assert!(!rsm.is_relation("name"));
    }
}

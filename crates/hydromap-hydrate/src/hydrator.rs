//! Single-entity row hydrator.
//!
//! The fast path for queries known to select exactly one object type per row
//! and no scalar columns. Rows stream in one at a time; each row resolves
//! its concrete entity type (via the discriminator column when the entity
//! uses inheritance), converts raw column values through their declared
//! types, and hands the assembled field map to the identity layer for
//! materialization. Queries with joined associations or scalar columns need
//! a full object hydrator instead.

use crate::rsm::ResultSetMapping;
use crate::session::HydrationHints;
use hydromap_core::{
    convert_to_domain, ConfigError, EntityMeta, Error, HydrationError, Platform, Result, Row,
    RowSource, SqlType, Value,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One row's assembled field data: field name -> converted domain value.
pub type FieldMap = BTreeMap<String, Value>;

/// The identity/unit-of-work collaborator hydration feeds into.
///
/// `trigger_eager_loads` and `hydration_complete` are lifecycle signals
/// fired exactly once at the end of a pass; internal iteration additionally
/// flushes deferred loads after every row.
pub trait HydrationSink {
    /// The materialized object type this sink produces.
    type Entity;

    /// Materialize (or return the identity-mapped instance for) one row.
    ///
    /// May itself trigger nested hydration.
    fn create_entity(
        &mut self,
        entity_name: &str,
        data: FieldMap,
        hints: &HydrationHints,
    ) -> Result<Self::Entity>;

    /// Refresh the already-managed entity with new field data in place.
    fn register_refresh(&mut self, entity_name: &str, id: &[Value], data: FieldMap) -> Result<()>;

    /// Run any eager loads deferred while hydrating.
    fn trigger_eager_loads(&mut self) -> Result<()>;

    /// Release hydration-scoped resources.
    fn hydration_complete(&mut self);
}

/// Per-column hydration metadata, resolved once per column label.
#[derive(Debug, Clone)]
struct ColumnHydration {
    field_name: String,
    sql_type: Option<SqlType>,
    discriminator_scope: Option<HashSet<String>>,
}

/// Hydrator for single-object-type, no-scalar result sets.
#[derive(Debug)]
pub struct SimpleEntityHydrator {
    rsm: ResultSetMapping,
    meta: EntityMeta,
    platform: Platform,
    /// Column label -> resolved info; `None` marks an unmapped column.
    column_cache: HashMap<String, Option<ColumnHydration>>,
}

impl SimpleEntityHydrator {
    /// Set up a hydrator, validating the result-set mapping.
    ///
    /// Fails with a configuration error before any row is fetched if the
    /// mapping describes more than one object result, contains scalar
    /// mappings, or names a different entity than the supplied metadata.
    pub fn new(rsm: ResultSetMapping, meta: EntityMeta, platform: Platform) -> Result<Self> {
        if rsm.entity_count() != 1 {
            return Err(Error::Config(ConfigError {
                message: format!(
                    "the single-entity hydrator requires exactly one object result, found {}",
                    rsm.entity_count()
                ),
            }));
        }

        if rsm.has_scalars() {
            return Err(Error::Config(ConfigError {
                message: "the single-entity hydrator does not support scalar mappings".to_string(),
            }));
        }

        let (_, mapped_entity) = rsm.first_entity().expect("one entity checked above");
        if mapped_entity != meta.entity_name() {
            return Err(Error::Config(ConfigError {
                message: format!(
                    "result-set mapping selects '{mapped_entity}' but metadata describes '{}'",
                    meta.entity_name()
                ),
            }));
        }

        Ok(Self {
            rsm,
            meta,
            platform,
            column_cache: HashMap::new(),
        })
    }

    /// Hydrate every row from the source and return the materialized
    /// entities in row order.
    ///
    /// The end-of-pass signals (`trigger_eager_loads`, then
    /// `hydration_complete`) fire exactly once, even for an empty result
    /// set. A failing row aborts the pass; the error propagates and no
    /// completion signal is sent.
    pub fn hydrate_all<S: HydrationSink>(
        &mut self,
        rows: &mut dyn RowSource,
        sink: &mut S,
        hints: &HydrationHints,
    ) -> Result<Vec<S::Entity>> {
        let mut result = Vec::new();

        while let Some(row) = rows.fetch_next()? {
            self.hydrate_row(&row, sink, hints, &mut result)?;
        }

        sink.trigger_eager_loads()?;
        sink.hydration_complete();

        Ok(result)
    }

    fn hydrate_row<S: HydrationSink>(
        &mut self,
        row: &Row,
        sink: &mut S,
        hints: &HydrationHints,
        result: &mut Vec<S::Entity>,
    ) -> Result<()> {
        let (entity_name, discr_value, discr_column) = self.resolve_entity_type(row)?;

        let mut data = FieldMap::new();

        for (column, raw) in row.iter() {
            // The discriminator column is consumed by type resolution.
            if discr_column.as_deref() == Some(column) {
                continue;
            }

            if self.rsm.is_relation(column) {
                return Err(HydrationError::association_column(column).into());
            }

            let Some(info) = self.column_info(column) else {
                tracing::trace!(column, "skipping unmapped result column");
                continue;
            };

            // Columns scoped to sibling subtypes do not apply to this row.
            if let Some(scope) = &info.discriminator_scope {
                let in_scope = discr_value
                    .as_deref()
                    .is_some_and(|value| scope.contains(value));
                if !in_scope {
                    continue;
                }
            }

            // Null is checked before conversion; some types map null onto
            // a concrete value.
            let raw_is_null = raw.is_null();

            let value = match info.sql_type {
                Some(declared) => convert_to_domain(declared, raw.clone(), &self.platform)
                    .map_err(|err| attach_column(err, column))?,
                None => raw.clone(),
            };

            // First concrete value wins: a null from an unmatched subclass
            // slot must not clobber a value already recorded for the field.
            let existing_is_concrete = data
                .get(&info.field_name)
                .is_some_and(|current| !current.is_null());
            if !existing_is_concrete || !raw_is_null {
                data.insert(info.field_name, value);
            }
        }

        if let Some(id) = &hints.refresh_entity {
            sink.register_refresh(&entity_name, id, data)?;
            return Ok(());
        }

        let entity = sink.create_entity(&entity_name, data, hints)?;
        result.push(entity);

        if hints.internal_iteration {
            sink.trigger_eager_loads()?;
        }

        Ok(())
    }

    /// Resolve the concrete entity name for a row, plus the discriminator
    /// value and the result column it was read from.
    fn resolve_entity_type(&self, row: &Row) -> Result<(String, Option<String>, Option<String>)> {
        let Some(discr) = self.meta.discriminator() else {
            return Ok((self.meta.entity_name().to_string(), None, None));
        };

        let mut column = self.platform.result_casing(discr.column());
        // The column may have been renamed by a meta mapping upstream.
        if let Some(alias) = self.rsm.meta_alias_of(&column) {
            column = alias.to_string();
        }

        let entity_name = self.meta.entity_name();
        let raw = row
            .get_by_name(&column)
            .ok_or_else(|| HydrationError::missing_discriminator(entity_name, &column))?;

        let text = discriminator_text(raw)
            .ok_or_else(|| HydrationError::missing_discriminator(entity_name, &column))?;

        if text.is_empty() {
            return Err(HydrationError::empty_discriminator(entity_name, &column).into());
        }

        let concrete = discr
            .resolve(&text)
            .ok_or_else(|| HydrationError::unknown_discriminator(&text, &discr.known_values()))?;

        Ok((concrete.to_string(), Some(text), Some(column)))
    }

    fn column_info(&mut self, column: &str) -> Option<ColumnHydration> {
        if let Some(cached) = self.column_cache.get(column) {
            return cached.clone();
        }

        let resolved = self.rsm.field(column).map(|mapping| ColumnHydration {
            field_name: mapping.field_name.clone(),
            sql_type: mapping.sql_type,
            discriminator_scope: mapping.declared_by.clone(),
        });
        self.column_cache.insert(column.to_string(), resolved.clone());
        resolved
    }
}

/// Render a raw discriminator value as the text looked up in the map.
///
/// Null (and anything that is neither text nor integral) counts as absent.
fn discriminator_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Text(s) => Some(s.clone()),
        other => other.as_i64().map(|i| i.to_string()),
    }
}

fn attach_column(err: Error, column: &str) -> Error {
    match err {
        Error::Type(mut type_err) => {
            type_err.column = Some(column.to_string());
            Error::Type(type_err)
        }
        other => other,
    }
}

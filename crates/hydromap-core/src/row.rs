//! Result rows and row sources.

use crate::value::Value;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Column metadata shared across all rows in a result set.
///
/// Wrapped in `Arc` so all rows from the same query share the same column
/// information.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column names in order
    names: Vec<String>,
    /// Name -> index mapping for O(1) lookup
    name_to_index: HashMap<String, usize>,
}

impl ColumnInfo {
    /// Create new column info from a list of column names.
    pub fn new(names: Vec<String>) -> Self {
        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            name_to_index,
        }
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the index of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Check if a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Get all column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A single row pulled from a raw result set.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values in order
    values: Vec<Value>,
    /// Shared column metadata
    columns: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with the given columns and values.
    ///
    /// For multiple rows from the same result set, prefer `with_columns`
    /// to share the column metadata.
    pub fn new(column_names: Vec<String>, values: Vec<Value>) -> Self {
        let columns = Arc::new(ColumnInfo::new(column_names));
        Self { values, columns }
    }

    /// Create a new row with shared column metadata.
    pub fn with_columns(columns: Arc<ColumnInfo>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get the shared column metadata.
    pub fn column_info(&self) -> Arc<ColumnInfo> {
        Arc::clone(&self.columns)
    }

    /// Get the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index. O(1) operation.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name. O(1) operation via HashMap lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns.index_of(name).and_then(|i| self.values.get(i))
    }

    /// Check if a column exists by name.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.names().iter().map(String::as_str)
    }

    /// Iterate over (column_name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// A source of raw result rows, pulled one at a time on demand.
///
/// Implemented by statement/driver adapters; `Ok(None)` signals end-of-data.
/// A source is not restartable: once it returns `None` it stays exhausted.
pub trait RowSource {
    /// Fetch the next row, or `None` when the result set is exhausted.
    fn fetch_next(&mut self) -> Result<Option<Row>>;
}

/// A fully buffered row source over a `Vec<Row>`.
///
/// Used by tests and by adapters that already hold all rows in memory.
#[derive(Debug, Default)]
pub struct MemoryRowSource {
    rows: std::vec::IntoIter<Row>,
}

impl MemoryRowSource {
    /// Create a source yielding the given rows in order.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl RowSource for MemoryRowSource {
    fn fetch_next(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::new(
            vec!["id".to_string(), "name".to_string()],
            vec![Value::BigInt(1), Value::Text("Alice".to_string())],
        )
    }

    #[test]
    fn name_based_access() {
        let row = sample_row();
        assert_eq!(row.get_by_name("id"), Some(&Value::BigInt(1)));
        assert_eq!(
            row.get_by_name("name"),
            Some(&Value::Text("Alice".to_string()))
        );
        assert_eq!(row.get_by_name("missing"), None);
        assert!(row.contains_column("name"));
    }

    #[test]
    fn shared_column_info() {
        let row = sample_row();
        let columns = row.column_info();
        let row2 = Row::with_columns(columns, vec![Value::BigInt(2), Value::Null]);
        assert_eq!(row2.get_by_name("id"), Some(&Value::BigInt(2)));
        assert!(row2.get_by_name("name").unwrap().is_null());
    }

    #[test]
    fn memory_source_drains_in_order() {
        let mut source = MemoryRowSource::new(vec![sample_row(), sample_row()]);
        assert!(source.fetch_next().unwrap().is_some());
        assert!(source.fetch_next().unwrap().is_some());
        assert!(source.fetch_next().unwrap().is_none());
        // Stays exhausted.
        assert!(source.fetch_next().unwrap().is_none());
    }
}

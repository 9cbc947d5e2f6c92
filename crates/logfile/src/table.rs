use crate::error::SchemaError;

/// An event-log table: a header plus string records, owned by a single
/// transform invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names, in file order.
    pub columns: Vec<String>,
    /// Data records; every record has exactly `columns.len()` fields.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from a header and records.
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data records.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no data records.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Overwrite all column names positionally.
    ///
    /// Used for files whose producer wrote no header; the count check runs
    /// before any name is touched.
    pub fn rename_positional(&mut self, names: &[&str]) -> Result<(), SchemaError> {
        if names.len() != self.columns.len() {
            return Err(SchemaError::CountMismatch {
                expected: names.len(),
                found: self.columns.len(),
            });
        }
        self.columns = names.iter().map(|n| (*n).to_owned()).collect();
        Ok(())
    }

    /// Remove the named column and its field from every record. Unknown
    /// names are ignored.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(index) = self.column_index(name) {
            self.columns.remove(index);
            for row in &mut self.rows {
                row.remove(index);
            }
        }
    }

    /// Keep only the first `limit` records (the test-mode sampling knob).
    pub fn truncate_rows(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }
}

/// Confirm that `actual` matches the `expected` column list exactly.
///
/// A length mismatch is reported before any name comparison; otherwise the
/// first diverging position is reported with both names.
pub fn validate_columns(actual: &[String], expected: &[&str]) -> Result<(), SchemaError> {
    if actual.len() != expected.len() {
        return Err(SchemaError::CountMismatch { expected: expected.len(), found: actual.len() });
    }
    for (position, (found, want)) in actual.iter().zip(expected).enumerate() {
        if found != want {
            return Err(SchemaError::NameMismatch {
                position,
                expected: (*want).to_owned(),
                found: found.clone(),
            });
        }
    }
    Ok(())
}

use std::{collections::HashMap, path::Path};

use tracing::debug;

use crate::{
    error::{LogFileError, SchemaError},
    table::Table,
};

/// Read an event-log CSV file and repair the known logger artifacts.
///
/// The declared header is captured separately; if the first body record is
/// an exact copy of it (the duplicated-header artifact), that record is
/// stripped. Afterwards every record that occurs more than once is removed
/// entirely — duplicates are double-fired probes, i.e. corrupted
/// measurements, so no copy survives. Remaining record order is preserved.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, LogFileError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LogFileError::FileNotFound(path.to_owned()));
    }

    let mut reader =
        csv::ReaderBuilder::new().has_headers(false).flexible(true).from_path(path)?;
    let mut records = reader.records();

    let columns: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_owned).collect(),
        None => return Ok(Table::default()),
    };

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let row: Vec<String> = record?.iter().map(str::to_owned).collect();
        if row.len() != columns.len() {
            return Err(SchemaError::RecordWidth {
                record: index,
                expected: columns.len(),
                found: row.len(),
            }
            .into());
        }
        rows.push(row);
    }

    if rows.first().is_some_and(|row| *row == columns) {
        debug!(path = %path.display(), "stripping duplicated header row");
        rows.remove(0);
    }

    let before = rows.len();
    drop_duplicate_rows(&mut rows);
    if rows.len() < before {
        debug!(path = %path.display(), removed = before - rows.len(), "removed duplicate rows");
    }

    Ok(Table::new(columns, rows))
}

/// Remove every record that occurs more than once. All copies go: a repeated
/// measurement is treated as corrupted, not as a repeat.
fn drop_duplicate_rows(rows: &mut Vec<Vec<String>>) {
    let mut occurrences: HashMap<&[String], usize> = HashMap::with_capacity(rows.len());
    for row in rows.iter() {
        *occurrences.entry(row.as_slice()).or_insert(0) += 1;
    }
    let unique: Vec<bool> = rows.iter().map(|row| occurrences[row.as_slice()] == 1).collect();
    let mut keep = unique.iter().copied();
    rows.retain(|_| keep.next().unwrap_or(false));
}

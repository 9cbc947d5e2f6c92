use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing event-log CSV files.
#[derive(Debug, Error)]
pub enum LogFileError {
    /// The requested log file does not exist.
    #[error("{} is not in the input path", .0.display())]
    FileNotFound(PathBuf),
    /// The file's columns do not match what the metric expects.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Malformed CSV content.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Column-level mismatches between a file and its expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The number of columns differs from the expected schema.
    #[error("unmatched column count: expected {expected}, found {found}")]
    CountMismatch {
        /// Expected number of columns.
        expected: usize,
        /// Number of columns actually present.
        found: usize,
    },
    /// A column name diverges from the expected schema.
    #[error("column {position} unmatched: expected `{expected}`, found `{found}`")]
    NameMismatch {
        /// Zero-based position of the first diverging column.
        position: usize,
        /// Column name the schema expects at that position.
        expected: String,
        /// Column name actually found.
        found: String,
    },
    /// A data record's field count is incompatible with the header.
    #[error("record {record} has {found} fields but the header has {expected}")]
    RecordWidth {
        /// Zero-based record index within the body.
        record: usize,
        /// Field count of the header.
        expected: usize,
        /// Field count of the offending record.
        found: usize,
    },
}

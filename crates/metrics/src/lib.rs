//! Derived metric transforms for Gethscope.
//!
//! Each transform turns one or two raw event-log CSVs into a bucketed,
//! two-column result series; the batch driver runs all of them with
//! per-metric failure isolation and merges the results into one summary
//! table. Transforms are organized by node layer, mirroring the
//! instrumentation points.

/// Bucketed aggregation helpers
pub mod aggregate;
/// Batch driver running every transform
pub mod batch;
/// Block lifecycle metrics (commit duration, tps, validation, tx delay)
pub mod block;
/// Consensus layer metrics
pub mod consensus;
/// Contract layer metrics
pub mod contract;
/// Transform error taxonomy
pub mod error;
/// Result series merging
pub mod merge;
/// Network layer metrics
pub mod network;
/// State database metrics
pub mod storage;
/// Transaction pool metrics
pub mod txpool;

use std::path::Path;

use logfile::{Table, read_table, validate_columns};

pub use error::MetricError;

/// Per-transform switches: schema verification, positional header rewrite
/// for headerless producers, and the test-mode row sampling knob.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Verify the file's header against the expected schema.
    pub check_column_name: bool,
    /// Overwrite the header positionally instead of validating it.
    pub add_column_name: bool,
    /// Process only the first N records.
    pub sample: Option<usize>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { check_column_name: true, add_column_name: false, sample: None }
    }
}

/// Signature shared by every per-metric transform.
pub type Transform = fn(&Path, &Path, &TransformOptions) -> Result<(), MetricError>;

pub(crate) fn load_metric_table(
    path: &Path,
    expected: &[&str],
    opts: &TransformOptions,
) -> Result<Table, MetricError> {
    let mut table = read_table(path)?;
    if opts.check_column_name {
        validate_columns(&table.columns, expected)?;
    }
    if opts.add_column_name {
        table.rename_positional(expected)?;
    }
    if let Some(limit) = opts.sample {
        table.truncate_rows(limit);
    }
    Ok(table)
}

pub(crate) fn column(table: &Table, name: &str) -> Result<usize, MetricError> {
    table.column_index(name).ok_or_else(|| MetricError::MissingColumn(name.to_owned()))
}

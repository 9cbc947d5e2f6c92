//! State database panels: write and read durations, normalized to seconds.

use std::path::Path;

use logfile::read_table;
use primitives::normalize_duration;

use crate::{
    DashboardError,
    helpers::column,
    models::{DbReadRow, DbWriteRow},
};

const WRITE_FILE: &str = "db_state_write_rate.csv";
const READ_FILE: &str = "db_state_read_rate.csv";

/// Per-block state write durations in seconds.
pub fn db_write_rows(input_dir: &Path) -> Result<Vec<DbWriteRow>, DashboardError> {
    let table = read_table(input_dir.join(WRITE_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let height = column(&table, "block_height")?;
    let hash = column(&table, "block_hash")?;
    let duration = column(&table, "write_duration")?;

    Ok(table
        .rows
        .iter()
        .map(|row| DbWriteRow {
            block_height: row[height].clone(),
            block_hash: row[hash].clone(),
            seconds: normalize_duration(&row[duration]),
        })
        .collect())
}

/// Per-block state read durations in seconds.
pub fn db_read_rows(input_dir: &Path) -> Result<Vec<DbReadRow>, DashboardError> {
    let table = read_table(input_dir.join(READ_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let time = column(&table, "measure_time")?;
    let hash = column(&table, "block_hash")?;
    let duration = column(&table, "read_duration")?;

    Ok(table
        .rows
        .iter()
        .map(|row| DbReadRow {
            measure_time: row[time].clone(),
            block_hash: row[hash].clone(),
            seconds: normalize_duration(&row[duration]),
        })
        .collect())
}

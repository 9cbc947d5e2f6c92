//! State database metrics: write and read durations.
//!
//! The batch path is a straight passthrough of the raw duration literals
//! with the time axis truncated to seconds; the live dashboard normalizes
//! the literals to seconds when it needs numbers.

use std::path::Path;

use tracing::info;

use logfile::write_series;
use primitives::time::{SECOND_PRECISION, bucket_key};

use crate::{MetricError, TransformOptions, column, load_metric_table};

const WRITE_FILE: &str = "db_state_write_rate.csv";
const WRITE_COLUMNS: [&str; 4] = ["measure_time", "block_height", "block_hash", "write_duration"];

const READ_FILE: &str = "db_state_read_rate.csv";
const READ_COLUMNS: [&str; 3] = ["measure_time", "block_hash", "read_duration"];

/// Duration of each state write, keyed by the second it was measured in.
pub fn db_state_write_rate(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    passthrough_rate(
        &input_dir.join(WRITE_FILE),
        &output_dir.join("db_state_write_rate_result.csv"),
        &WRITE_COLUMNS,
        "write_duration",
        "db_state_write_rate",
        opts,
    )
}

/// Duration of each state read, keyed by the second it was measured in.
pub fn db_state_read_rate(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    passthrough_rate(
        &input_dir.join(READ_FILE),
        &output_dir.join("db_state_read_rate_result.csv"),
        &READ_COLUMNS,
        "read_duration",
        "db_state_read_rate",
        opts,
    )
}

fn passthrough_rate(
    input: &Path,
    output: &Path,
    expected: &[&str],
    duration_column: &str,
    metric: &str,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(input, expected, opts)?;
    let time = column(&table, "measure_time")?;
    let duration = column(&table, duration_column)?;

    let series = table
        .rows
        .iter()
        .map(|row| (bucket_key(&row[time], SECOND_PRECISION).to_owned(), row[duration].clone()));
    write_series(output, metric, series)?;
    info!(metric, "transform finished");
    Ok(())
}

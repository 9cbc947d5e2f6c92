//! Contract layer metrics: execution time and intra-block conflict rate.

use std::path::Path;

use tracing::info;

use logfile::write_series;
use primitives::{normalize_duration, time::SECOND_PRECISION};

use crate::{
    MetricError, TransformOptions,
    aggregate::{bucket_mean, retain_non_negative},
    column, load_metric_table,
};

const CONTRACT_FILE: &str = "contract_time.csv";
const CONTRACT_COLUMNS: [&str; 5] = ["TxHash", "ContractAddr", "StartTime", "EndTime", "ExecTime"];

const CONFLICT_FILE: &str = "block_tx_conflict_rate.csv";
const CONFLICT_COLUMNS: [&str; 4] =
    ["measure_time", "conflict_count", "block_height", "block_tx_count"];

/// Seconds spent executing each contract call, keyed by its end time.
///
/// The contract tracer writes camel-case headers unlike every other probe;
/// the schema here follows the file, not the house style.
pub fn contract_time(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(&input_dir.join(CONTRACT_FILE), &CONTRACT_COLUMNS, opts)?;
    let end = column(&table, "EndTime")?;
    let exec = column(&table, "ExecTime")?;

    let mut samples: Vec<(String, f64)> = table
        .rows
        .iter()
        .map(|row| (row[end].clone(), normalize_duration(&row[exec])))
        .collect();
    retain_non_negative(&mut samples);

    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(output_dir.join("contract_time_result.csv"), "exec_time", series)?;
    info!(metric = "contract_time", "transform finished");
    Ok(())
}

/// Share of a block's transactions that conflicted during parallel execution.
pub fn block_tx_conflict_rate(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(&input_dir.join(CONFLICT_FILE), &CONFLICT_COLUMNS, opts)?;
    let time = column(&table, "measure_time")?;
    let conflicts = column(&table, "conflict_count")?;
    let total = column(&table, "block_tx_count")?;

    let mut samples = Vec::with_capacity(table.len());
    for row in &table.rows {
        let conflict_count: f64 = row[conflicts].parse().unwrap_or(f64::NAN);
        let tx_count: f64 = row[total].parse().unwrap_or(f64::NAN);
        samples.push((row[time].clone(), conflict_count / tx_count));
    }
    // An empty block divides by zero; the non-finite ratio is dropped here.
    retain_non_negative(&mut samples);

    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(output_dir.join("block_tx_conflict_rate_result.csv"), "conflict_rate", series)?;
    info!(metric = "block_tx_conflict_rate", "transform finished");
    Ok(())
}

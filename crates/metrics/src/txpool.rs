//! Transaction pool metrics: input throughput and queueing delay.

use std::{collections::BTreeMap, path::Path};

use tracing::info;

use logfile::write_series;
use primitives::{
    parse_timestamp, seconds_between,
    time::{MICROSECOND_PRECISION, SECOND_PRECISION, bucket_key},
};

use crate::{
    MetricError, TransformOptions,
    aggregate::{bucket_mean, retain_non_negative},
    column, load_metric_table,
};

const THROUGHPUT_FILE: &str = "transaction_pool_input_throughput.csv";
const THROUGHPUT_COLUMNS: [&str; 3] = ["measure_time", "tx_id", "source"];

const QUEUE_DELAY_FILE: &str = "tx_queue_delay.csv";
const QUEUE_DELAY_COLUMNS: [&str; 3] = ["measure_time", "tx_hash", "in/outFlag"];

/// Transactions entering the pool per second.
pub fn transaction_pool_input_throughput(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let mut table =
        load_metric_table(&input_dir.join(THROUGHPUT_FILE), &THROUGHPUT_COLUMNS, opts)?;
    table.drop_column("tx_id");
    let time = column(&table, "measure_time")?;

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for row in &table.rows {
        *counts.entry(bucket_key(&row[time], SECOND_PRECISION).to_owned()).or_insert(0) += 1;
    }

    write_series(
        output_dir.join("transaction_pool_input_throughput_result.csv"),
        "transaction_pool_input_throughput",
        counts,
    )?;
    info!(metric = "transaction_pool_input_throughput", "transform finished");
    Ok(())
}

/// Time a transaction spends queued in the pool, in milliseconds.
///
/// Rows sharing a tx hash alternate strictly between `in` and `out` in log
/// order; a broken alternation is a correlation error for that hash. A group
/// ending on an unmatched `in` (the transaction has not left the pool yet)
/// silently drops that trailing row. Buckets are sub-second so that pool
/// round-trips within the same second stay distinguishable.
pub fn tx_queue_delay(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(&input_dir.join(QUEUE_DELAY_FILE), &QUEUE_DELAY_COLUMNS, opts)?;
    let time = column(&table, "measure_time")?;
    let hash = column(&table, "tx_hash")?;
    let flag = column(&table, "in/outFlag")?;

    // Group rows by tx hash, preserving log order within each group.
    let mut groups: BTreeMap<&str, Vec<&Vec<String>>> = BTreeMap::new();
    for row in &table.rows {
        groups.entry(row[hash].as_str()).or_default().push(row);
    }

    let mut samples = Vec::new();
    for (tx_hash, rows) in groups {
        if rows.len() == 1 {
            continue;
        }
        let mut in_index = 0;
        let mut out_index = 1;
        while in_index < rows.len() && out_index < rows.len() {
            if rows[in_index][flag] != "in" || rows[out_index][flag] != "out" {
                return Err(MetricError::Correlation { tx_hash: tx_hash.to_owned() });
            }
            let out_time = parse_timestamp(&rows[out_index][time])?;
            let in_time = parse_timestamp(&rows[in_index][time])?;
            let delay_ms = seconds_between(out_time, in_time) * 1000.0;
            samples.push((rows[out_index][time].clone(), delay_ms));
            in_index += 2;
            out_index += 2;
        }
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, MICROSECOND_PRECISION);
    write_series(output_dir.join("tx_queue_delay_result.csv"), "tx_queue_delay", series)?;
    info!(metric = "tx_queue_delay", "transform finished");
    Ok(())
}

//! Block lifecycle metrics: commit duration, in-block throughput,
//! validation efficiency and transaction confirmation delay.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use tracing::info;

use logfile::{Table, write_series};
use primitives::{normalize_duration, parse_timestamp, seconds_between, time::SECOND_PRECISION};

use crate::{
    MetricError, TransformOptions,
    aggregate::{bucket_mean, retain_non_negative},
    column, load_metric_table,
};

const COMMIT_START_FILE: &str = "block_commit_duration_start.csv";
const COMMIT_START_COLUMNS: [&str; 2] = ["measure_time", "block_height"];
const COMMIT_END_FILE: &str = "block_commit_duration_end.csv";
const COMMIT_END_COLUMNS: [&str; 4] =
    ["measure_time", "block_height", "block_hash", "block_tx_count"];

const VALIDATION_START_FILE: &str = "block_validation_efficiency_start.csv";
const VALIDATION_START_COLUMNS: [&str; 3] =
    ["measure_time", "block_hash", "block_validation_duration"];
const VALIDATION_END_FILE: &str = "block_validation_efficiency_end.csv";
const VALIDATION_END_COLUMNS: [&str; 3] = ["measure_time", "block_hash", "block_tx_count"];

const TX_DELAY_START_FILE: &str = "tx_delay_start.csv";
const TX_DELAY_START_COLUMNS: [&str; 2] = ["measure_time", "tx_hash"];
const TX_DELAY_END_FILE: &str = "tx_delay_end.csv";
const TX_DELAY_END_COLUMNS: [&str; 3] = ["measure_time", "block_height", "tx_hash"];

/// Seconds between a block being handed to the miner and its commit.
pub fn block_commit_duration(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let mut samples = Vec::new();
    for (send_time, confirm_time, _) in commit_pairs(input_dir, opts)? {
        let confirm = parse_timestamp(&confirm_time)?;
        let send = parse_timestamp(&send_time)?;
        // Keyed by the send time: the series answers "how long did the block
        // started at this moment take to commit".
        let delta = seconds_between(confirm, send);
        samples.push((send_time, delta));
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(
        output_dir.join("block_commit_duration_result.csv"),
        "block_commit_duration",
        series,
    )?;
    info!(metric = "block_commit_duration", "transform finished");
    Ok(())
}

/// Transactions committed per block over the block's send-to-confirm span.
///
/// The divisor scales elapsed seconds by 1e6; that is how the node has
/// always reported this figure, so the scaling is kept bit-for-bit even
/// though it disagrees with the plain-seconds arithmetic used elsewhere.
pub fn tx_in_block_tps(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let mut samples = Vec::new();
    for (send_time, confirm_time, tx_count) in commit_pairs(input_dir, opts)? {
        let confirm = parse_timestamp(&confirm_time)?;
        let send = parse_timestamp(&send_time)?;
        let count: f64 = tx_count.parse().unwrap_or(f64::NAN);
        let tps = count / (seconds_between(confirm, send) / 1e6);
        samples.push((confirm_time, (tps * 100.0).round() / 100.0));
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(output_dir.join("tx_in_block_tps_result.csv"), "tx_tps", series)?;
    info!(metric = "tx_in_block_tps", "transform finished");
    Ok(())
}

/// Transactions validated per second of block validation time.
pub fn block_validation_efficiency(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let starts = load_metric_table(
        &input_dir.join(VALIDATION_START_FILE),
        &VALIDATION_START_COLUMNS,
        opts,
    )?;
    let ends =
        load_metric_table(&input_dir.join(VALIDATION_END_FILE), &VALIDATION_END_COLUMNS, opts)?;

    let start_time = column(&starts, "measure_time")?;
    let start_hash = column(&starts, "block_hash")?;
    let start_duration = column(&starts, "block_validation_duration")?;
    let end_hash = column(&ends, "block_hash")?;
    let end_count = column(&ends, "block_tx_count")?;

    let counts_by_hash = index_rows(&ends, end_hash);
    let mut samples = Vec::new();
    for row in &starts.rows {
        let Some(matches) = counts_by_hash.get(row[start_hash].as_str()) else { continue };
        let duration = normalize_duration(&row[start_duration]);
        for end_row in matches {
            let count: f64 = end_row[end_count].parse().unwrap_or(f64::NAN);
            samples.push((row[start_time].clone(), count / duration));
        }
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(
        output_dir.join("block_validation_efficiency_result.csv"),
        "block_validation_efficiency",
        series,
    )?;
    info!(metric = "block_validation_efficiency", "transform finished");
    Ok(())
}

/// Seconds between a transaction entering the pool and its confirmation.
pub fn tx_delay(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let starts =
        load_metric_table(&input_dir.join(TX_DELAY_START_FILE), &TX_DELAY_START_COLUMNS, opts)?;
    let ends = load_metric_table(&input_dir.join(TX_DELAY_END_FILE), &TX_DELAY_END_COLUMNS, opts)?;

    let send_time = column(&starts, "measure_time")?;
    let start_hash = column(&starts, "tx_hash")?;
    let confirm_time = column(&ends, "measure_time")?;
    let end_hash = column(&ends, "tx_hash")?;

    let confirms_by_hash = index_rows(&ends, end_hash);
    let mut samples = Vec::new();
    for row in &starts.rows {
        let Some(matches) = confirms_by_hash.get(row[start_hash].as_str()) else { continue };
        let send = parse_timestamp(&row[send_time])?;
        for end_row in matches {
            let confirm = parse_timestamp(&end_row[confirm_time])?;
            // The series is keyed by the send time: it answers "how long did
            // transactions submitted at this moment take".
            samples.push((row[send_time].clone(), seconds_between(confirm, send)));
        }
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(output_dir.join("tx_delay_result.csv"), "tx_confirm_delay", series)?;
    info!(metric = "tx_delay", "transform finished");
    Ok(())
}

/// Join the commit start/end files on block height.
///
/// The miner can be asked to prepare the same height more than once; only
/// the first start record counts. Returns `(send_time, confirm_time,
/// block_tx_count)` per joined pair, in start-file order.
fn commit_pairs(
    input_dir: &Path,
    opts: &TransformOptions,
) -> Result<Vec<(String, String, String)>, MetricError> {
    let starts =
        load_metric_table(&input_dir.join(COMMIT_START_FILE), &COMMIT_START_COLUMNS, opts)?;
    let ends = load_metric_table(&input_dir.join(COMMIT_END_FILE), &COMMIT_END_COLUMNS, opts)?;

    let send_time = column(&starts, "measure_time")?;
    let start_height = column(&starts, "block_height")?;
    let confirm_time = column(&ends, "measure_time")?;
    let end_height = column(&ends, "block_height")?;
    let end_count = column(&ends, "block_tx_count")?;

    let ends_by_height = index_rows(&ends, end_height);
    let mut seen_heights = HashSet::new();
    let mut pairs = Vec::new();
    for row in &starts.rows {
        if !seen_heights.insert(row[start_height].as_str()) {
            continue;
        }
        let Some(matches) = ends_by_height.get(row[start_height].as_str()) else { continue };
        for end_row in matches {
            pairs.push((
                row[send_time].clone(),
                end_row[confirm_time].clone(),
                end_row[end_count].clone(),
            ));
        }
    }
    Ok(pairs)
}

fn index_rows(table: &Table, key: usize) -> BTreeMap<&str, Vec<&Vec<String>>> {
    let mut index: BTreeMap<&str, Vec<&Vec<String>>> = BTreeMap::new();
    for row in &table.rows {
        index.entry(row[key].as_str()).or_default().push(row);
    }
    index
}

//! Transaction lifecycle panels: confirmation delay, pool queueing,
//! block commit spans, in-block throughput and validation efficiency.

use std::{collections::HashMap, path::Path};

use logfile::{Table, read_table};
use primitives::{elapsed_seconds, normalize_duration};

use crate::{
    DashboardError,
    helpers::column,
    models::{BlockCommitRow, BlockTpsRow, TxDelayRow, TxQueueRow, ValidationRow},
};

const TX_DELAY_START_FILE: &str = "tx_delay_start.csv";
const TX_DELAY_END_FILE: &str = "tx_delay_end.csv";
const TX_QUEUE_FILE: &str = "tx_queue_delay.csv";
const COMMIT_START_FILE: &str = "block_commit_duration_start.csv";
const COMMIT_END_FILE: &str = "block_commit_duration_end.csv";
const TPS_START_FILE: &str = "tx_in_block_tps.csv";
const VALIDATION_START_FILE: &str = "block_validation_efficiency_start.csv";
const VALIDATION_END_FILE: &str = "block_validation_efficiency_end.csv";

/// Pool-entry-to-confirmation delay per transaction, negatives dropped.
pub fn tx_delay_rows(input_dir: &Path) -> Result<Vec<TxDelayRow>, DashboardError> {
    let starts = read_table(input_dir.join(TX_DELAY_START_FILE))?;
    let ends = read_table(input_dir.join(TX_DELAY_END_FILE))?;
    if starts.is_empty() || ends.is_empty() {
        return Ok(Vec::new());
    }
    let send_time = column(&starts, "measure_time")?;
    let start_hash = column(&starts, "tx_hash")?;
    let confirm_time = column(&ends, "measure_time")?;
    let end_height = column(&ends, "block_height")?;
    let end_hash = column(&ends, "tx_hash")?;

    let ends_by_hash = index_rows(&ends, end_hash);
    let mut rows = Vec::new();
    for record in &starts.rows {
        let Some(matches) = ends_by_hash.get(record[start_hash].as_str()) else { continue };
        for end_row in matches {
            let seconds = elapsed_seconds(&end_row[confirm_time], &record[send_time])?;
            if seconds < 0.0 {
                continue;
            }
            rows.push(TxDelayRow {
                tx_hash: record[start_hash].clone(),
                block_height: end_row[end_height].clone(),
                start_time: record[send_time].clone(),
                seconds,
            });
        }
    }
    Ok(rows)
}

/// Pool queueing span per transaction: `in` rows joined with `out` rows on
/// the tx hash, negatives dropped.
pub fn tx_queue_rows(input_dir: &Path) -> Result<Vec<TxQueueRow>, DashboardError> {
    let table = read_table(input_dir.join(TX_QUEUE_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let time = column(&table, "measure_time")?;
    let hash = column(&table, "tx_hash")?;
    let flag = column(&table, "in/outFlag")?;

    let mut outs_by_hash: HashMap<&str, Vec<&Vec<String>>> = HashMap::new();
    for row in table.rows.iter().filter(|row| row[flag] == "out") {
        outs_by_hash.entry(row[hash].as_str()).or_default().push(row);
    }

    let mut rows = Vec::new();
    for record in table.rows.iter().filter(|row| row[flag] == "in") {
        let Some(outs) = outs_by_hash.get(record[hash].as_str()) else { continue };
        for out_row in outs {
            let seconds = elapsed_seconds(&out_row[time], &record[time])?;
            if seconds < 0.0 {
                continue;
            }
            rows.push(TxQueueRow {
                tx_hash: record[hash].clone(),
                enter_time: record[time].clone(),
                exit_time: out_row[time].clone(),
                seconds,
            });
        }
    }
    Ok(rows)
}

/// Send-to-commit span per block.
///
/// The miner can be asked to prepare the same height repeatedly; unlike the
/// batch series (which keeps the first start), the live panel keeps the
/// LAST joined record per height, i.e. the most recent preparation.
pub fn block_commit_rows(input_dir: &Path) -> Result<Vec<BlockCommitRow>, DashboardError> {
    let starts = read_table(input_dir.join(COMMIT_START_FILE))?;
    let ends = read_table(input_dir.join(COMMIT_END_FILE))?;
    if starts.is_empty() || ends.is_empty() {
        return Ok(Vec::new());
    }
    let send_time = column(&starts, "measure_time")?;
    let start_height = column(&starts, "block_height")?;
    let confirm_time = column(&ends, "measure_time")?;
    let end_height = column(&ends, "block_height")?;
    let end_hash = column(&ends, "block_hash")?;
    let end_count = column(&ends, "block_tx_count")?;

    let ends_by_height = index_rows(&ends, end_height);
    let mut joined = Vec::new();
    for record in &starts.rows {
        let Some(matches) = ends_by_height.get(record[start_height].as_str()) else { continue };
        for end_row in matches {
            joined.push((record, *end_row));
        }
    }

    // Keep the last joined record per height.
    let mut last_for_height: HashMap<&str, usize> = HashMap::new();
    for (index, (record, _)) in joined.iter().enumerate() {
        last_for_height.insert(record[start_height].as_str(), index);
    }

    let mut rows = Vec::new();
    for (index, (record, end_row)) in joined.iter().enumerate() {
        if last_for_height[record[start_height].as_str()] != index {
            continue;
        }
        let seconds = elapsed_seconds(&end_row[confirm_time], &record[send_time])?;
        if seconds < 0.0 {
            continue;
        }
        rows.push(BlockCommitRow {
            block_height: record[start_height].clone(),
            block_hash: end_row[end_hash].clone(),
            block_tx_count: end_row[end_count].clone(),
            seconds,
        });
    }
    Ok(rows)
}

/// In-block transaction throughput: the pack-time log joined with the
/// commit log on the block's transactions root.
pub fn block_tps_rows(input_dir: &Path) -> Result<Vec<BlockTpsRow>, DashboardError> {
    let starts = read_table(input_dir.join(TPS_START_FILE))?;
    let ends = read_table(input_dir.join(COMMIT_END_FILE))?;
    if starts.is_empty() || ends.is_empty() {
        return Ok(Vec::new());
    }
    let start_time = column(&starts, "measure_time")?;
    let start_height = column(&starts, "block_height")?;
    let start_count = column(&starts, "block_tx_count")?;
    let start_root = column(&starts, "block_txsroot")?;
    let end_time = column(&ends, "measure_time")?;
    let end_root = column(&ends, "block_txsroot")?;

    let ends_by_root = index_rows(&ends, end_root);
    let mut rows = Vec::new();
    for record in &starts.rows {
        let Some(matches) = ends_by_root.get(record[start_root].as_str()) else { continue };
        for end_row in matches {
            let duration_seconds = elapsed_seconds(&end_row[end_time], &record[start_time])?;
            if duration_seconds < 0.0 {
                continue;
            }
            let count: f64 = record[start_count].parse().unwrap_or(f64::NAN);
            rows.push(BlockTpsRow {
                block_height: record[start_height].clone(),
                block_txsroot: record[start_root].clone(),
                duration_seconds,
                tps: count / duration_seconds,
            });
        }
    }
    Ok(rows)
}

/// Validation efficiency per block: transactions validated per second of
/// validation time, the duration normalized from its literal.
pub fn validation_rows(input_dir: &Path) -> Result<Vec<ValidationRow>, DashboardError> {
    let starts = read_table(input_dir.join(VALIDATION_START_FILE))?;
    let ends = read_table(input_dir.join(VALIDATION_END_FILE))?;
    if starts.is_empty() || ends.is_empty() {
        return Ok(Vec::new());
    }
    let start_hash = column(&starts, "block_hash")?;
    let start_duration = column(&starts, "block_validation_duration")?;
    let end_hash = column(&ends, "block_hash")?;
    let end_count = column(&ends, "block_tx_count")?;

    let ends_by_hash = index_rows(&ends, end_hash);
    let mut rows = Vec::new();
    for record in &starts.rows {
        let Some(matches) = ends_by_hash.get(record[start_hash].as_str()) else { continue };
        let duration_seconds = normalize_duration(&record[start_duration]);
        if duration_seconds < 0.0 || duration_seconds.is_nan() {
            continue;
        }
        for end_row in matches {
            let count: f64 = end_row[end_count].parse().unwrap_or(f64::NAN);
            rows.push(ValidationRow {
                block_hash: record[start_hash].clone(),
                block_tx_count: end_row[end_count].clone(),
                duration_seconds,
                efficiency: count / duration_seconds,
            });
        }
    }
    Ok(rows)
}

fn index_rows(table: &Table, key: usize) -> HashMap<&str, Vec<&Vec<String>>> {
    let mut index: HashMap<&str, Vec<&Vec<String>>> = HashMap::new();
    for row in &table.rows {
        index.entry(row[key].as_str()).or_default().push(row);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn tx_delay_rows_join_and_drop_negatives() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            TX_DELAY_START_FILE,
            "measure_time,tx_hash\n\
             2024-01-01 10:00:00.000000,0xaa\n\
             2024-01-01 10:00:09.000000,0xbb\n",
        );
        write(
            &dir,
            TX_DELAY_END_FILE,
            "measure_time,block_height,tx_hash\n\
             2024-01-01 10:00:03.000000,7,0xaa\n\
             2024-01-01 10:00:05.000000,7,0xbb\n",
        );

        let rows = tx_delay_rows(dir.path()).unwrap();
        // 0xbb confirmed before it was sent: clock anomaly, dropped.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tx_hash, "0xaa");
        assert_eq!(rows[0].block_height, "7");
        assert!((rows[0].seconds - 3.0).abs() < 1e-9);
    }

    #[test]
    fn tx_queue_rows_pair_in_with_out() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            TX_QUEUE_FILE,
            "measure_time,tx_hash,in/outFlag\n\
             2024-01-01 10:00:00.000000,0xaa,in\n\
             2024-01-01 10:00:00.250000,0xaa,out\n\
             2024-01-01 10:00:01.000000,0xbb,in\n",
        );

        let rows = tx_queue_rows(dir.path()).unwrap();
        // 0xbb never left the pool, so only 0xaa produces a span.
        assert_eq!(rows.len(), 1);
        assert!((rows[0].seconds - 0.25).abs() < 1e-9);
    }

    #[test]
    fn block_commit_rows_keep_last_start_per_height() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            COMMIT_START_FILE,
            "measure_time,block_height\n\
             2024-01-01 10:00:00.000000,100\n\
             2024-01-01 10:00:01.000000,100\n",
        );
        write(
            &dir,
            COMMIT_END_FILE,
            "measure_time,block_height,block_hash,block_tx_count\n\
             2024-01-01 10:00:02.000000,100,0xabc,5\n",
        );

        let rows = block_commit_rows(dir.path()).unwrap();
        // The later preparation wins on the live panel: 1s, not 2s.
        assert_eq!(rows.len(), 1);
        assert!((rows[0].seconds - 1.0).abs() < 1e-9);
        assert_eq!(rows[0].block_hash, "0xabc");
    }

    #[test]
    fn block_tps_rows_join_on_txsroot() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            TPS_START_FILE,
            "measure_time,block_height,block_tx_count,block_txsroot\n\
             2024-01-01 10:00:00.000000,100,50,0xroot\n",
        );
        write(
            &dir,
            COMMIT_END_FILE,
            "measure_time,block_height,block_hash,block_tx_count,block_txsroot\n\
             2024-01-01 10:00:02.000000,100,0xabc,50,0xroot\n",
        );

        let rows = block_tps_rows(dir.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].tps - 25.0).abs() < 1e-9);
    }

    #[test]
    fn validation_rows_compute_efficiency() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            VALIDATION_START_FILE,
            "measure_time,block_hash,block_validation_duration\n\
             2024-01-01 10:00:00.000000,0xabc,500ms\n",
        );
        write(
            &dir,
            VALIDATION_END_FILE,
            "measure_time,block_hash,block_tx_count\n2024-01-01 10:00:01.000000,0xabc,10\n",
        );

        let rows = validation_rows(dir.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].efficiency - 20.0).abs() < 1e-9);
    }

    #[test]
    fn missing_partner_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, TX_DELAY_START_FILE, "measure_time,tx_hash\n");
        assert!(tx_delay_rows(dir.path()).is_err());
    }
}

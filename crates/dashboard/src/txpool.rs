//! Transaction pool panels: live TPS and input summary.

use std::path::Path;

use logfile::read_table;
use primitives::elapsed_seconds;

use crate::{DashboardError, helpers::column, models::TxpoolInputSummary};

const THROUGHPUT_FILE: &str = "transaction_pool_input_throughput.csv";

/// Tail windows tried largest-first when estimating the live TPS; the
/// biggest window the log can fill wins.
const TPS_WINDOWS: [usize; 7] = [500, 200, 100, 50, 10, 5, 2];

/// Transactions per second over the freshest slice of the pool input log.
///
/// Returns 0.0 when fewer than two records exist or the window spans no
/// positive amount of time.
pub fn txpool_tps(input_dir: &Path) -> Result<f64, DashboardError> {
    let table = read_table(input_dir.join(THROUGHPUT_FILE))?;
    let time = column(&table, "measure_time")?;

    let Some(window) = TPS_WINDOWS.iter().copied().find(|w| table.len() >= *w) else {
        return Ok(0.0);
    };

    let rows = &table.rows;
    let start_time = &rows[rows.len() - window][time];
    let end_time = &rows[rows.len() - 1][time];
    let duration = elapsed_seconds(end_time, start_time)?;

    if duration > 0.0 { Ok(window as f64 / duration) } else { Ok(0.0) }
}

/// Aggregate view of the pool input log: totals, span, throughput and the
/// split between locally submitted and RPC-submitted transactions.
pub fn txpool_input_summary(input_dir: &Path) -> Result<Option<TxpoolInputSummary>, DashboardError> {
    let table = read_table(input_dir.join(THROUGHPUT_FILE))?;
    if table.is_empty() {
        return Ok(None);
    }
    let time = column(&table, "measure_time")?;
    let source = column(&table, "source")?;

    let start_time = table.rows[0][time].clone();
    let end_time = table.rows[table.len() - 1][time].clone();
    let duration_seconds = elapsed_seconds(&end_time, &start_time)?;
    let tx_count = table.len() as u64;
    let throughput =
        if duration_seconds > 0.0 { tx_count as f64 / duration_seconds } else { 0.0 };

    let local_count = table.rows.iter().filter(|row| row[source] == "1").count() as u64;
    let rpc_count = table.rows.iter().filter(|row| row[source] == "2").count() as u64;

    Ok(Some(TxpoolInputSummary {
        tx_count,
        start_time,
        end_time,
        duration_seconds,
        throughput,
        local_count,
        rpc_count,
    }))
}

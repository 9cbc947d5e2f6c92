//! Contract layer panels: execution time per call.

use std::path::Path;

use logfile::read_table;
use primitives::normalize_duration;

use crate::{DashboardError, helpers::column, models::ContractExecRow};

const CONTRACT_FILE: &str = "contract_time.csv";

/// Execution time of each contract call in seconds.
pub fn contract_exec_rows(input_dir: &Path) -> Result<Vec<ContractExecRow>, DashboardError> {
    let table = read_table(input_dir.join(CONTRACT_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let tx_hash = column(&table, "TxHash")?;
    let addr = column(&table, "ContractAddr")?;
    let start = column(&table, "StartTime")?;
    let exec = column(&table, "ExecTime")?;

    Ok(table
        .rows
        .iter()
        .map(|row| ContractExecRow {
            tx_hash: row[tx_hash].clone(),
            contract_addr: row[addr].clone(),
            start_time: row[start].clone(),
            seconds: normalize_duration(&row[exec]),
        })
        .collect())
}

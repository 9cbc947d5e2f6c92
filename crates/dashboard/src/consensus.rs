//! Consensus layer panels: per-round Clique cost.

use std::path::Path;

use logfile::read_table;
use primitives::normalize_duration;

use crate::{DashboardError, helpers::column, models::CliqueCostRow};

const CLIQUE_FILE: &str = "consensus_clique_cost.csv";

/// Per-round Clique cost in seconds, negatives clipped to zero.
pub fn clique_cost_rows(input_dir: &Path) -> Result<Vec<CliqueCostRow>, DashboardError> {
    let table = read_table(input_dir.join(CLIQUE_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let height = column(&table, "block_height")?;
    let cost = column(&table, "cost_time")?;

    Ok(table
        .rows
        .iter()
        .map(|row| {
            let seconds = normalize_duration(&row[cost]);
            CliqueCostRow {
                block_height: row[height].clone(),
                // Clip instead of drop: tiny negative costs are probe clock
                // rounding, and the sample should still count.
                seconds: if seconds < 0.0 { 0.0 } else { seconds },
            }
        })
        .collect())
}

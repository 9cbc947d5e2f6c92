//! Consensus layer metrics: per-round Clique cost.

use std::path::Path;

use tracing::info;

use logfile::write_series;
use primitives::{normalize_duration, time::SECOND_PRECISION};

use crate::{MetricError, TransformOptions, aggregate::bucket_mean, column, load_metric_table};

const CLIQUE_FILE: &str = "consensus_clique_cost.csv";
const CLIQUE_COLUMNS: [&str; 4] = ["block_height", "clique_start", "clique_end", "cost_time"];

/// Seconds one Clique round took, keyed by the round's end time.
///
/// Rounds ending slightly "before" they started are a known rounding
/// artifact of the probe clock, so negative costs are clipped to zero
/// rather than dropped — dropping them would thin out the sample count for
/// no reason. Entries whose cost does not parse are discarded.
pub fn consensus_clique_cost(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(&input_dir.join(CLIQUE_FILE), &CLIQUE_COLUMNS, opts)?;
    let end = column(&table, "clique_end")?;
    let cost = column(&table, "cost_time")?;

    let mut samples = Vec::with_capacity(table.len());
    for row in &table.rows {
        let seconds = normalize_duration(&row[cost]);
        if seconds.is_nan() {
            continue;
        }
        samples.push((row[end].clone(), seconds.max(0.0)));
    }

    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(output_dir.join("consensus_clique_cost_result.csv"), "cost_time", series)?;
    info!(metric = "consensus_clique_cost", "transform finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfile::read_table;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, rows: &str) {
        let mut file = std::fs::File::create(dir.path().join(CLIQUE_FILE)).unwrap();
        file.write_all(format!("block_height,clique_start,clique_end,cost_time\n{rows}").as_bytes())
            .unwrap();
    }

    #[test]
    fn cost_is_normalized_to_seconds() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            &dir,
            "100,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000,1500ms\n",
        );
        consensus_clique_cost(dir.path(), dir.path(), &TransformOptions::default()).unwrap();

        let result = read_table(dir.path().join("consensus_clique_cost_result.csv")).unwrap();
        assert_eq!(result.rows, vec![vec!["2024-01-01 10:00:02", "1.5"]]);
    }

    #[test]
    fn negative_cost_is_clipped_not_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            &dir,
            "100,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000,-3ms\n\
             101,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000,3ms\n",
        );
        consensus_clique_cost(dir.path(), dir.path(), &TransformOptions::default()).unwrap();

        let result = read_table(dir.path().join("consensus_clique_cost_result.csv")).unwrap();
        // The clipped zero still counts toward the bucket mean: (0 + 0.003) / 2.
        assert_eq!(result.rows, vec![vec!["2024-01-01 10:00:02", "0.0015"]]);
    }

    #[test]
    fn unparseable_cost_entries_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(&dir, "100,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000, NaN\n");
        consensus_clique_cost(dir.path(), dir.path(), &TransformOptions::default()).unwrap();

        let result = read_table(dir.path().join("consensus_clique_cost_result.csv")).unwrap();
        assert!(result.is_empty());
    }
}

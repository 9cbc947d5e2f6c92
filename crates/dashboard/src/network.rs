//! Network layer panels: P2P transmission latency.

use std::path::Path;

use logfile::read_table;
use primitives::elapsed_seconds;

use crate::{DashboardError, helpers::column, models::P2pLatencyRow};

const LATENCY_FILE: &str = "net_p2p_transmission_latency.csv";

/// Mean one-way latency per round trip: the average of the two directional
/// deliveries, negatives dropped.
pub fn p2p_latency_rows(input_dir: &Path) -> Result<Vec<P2pLatencyRow>, DashboardError> {
    let table = read_table(input_dir.join(LATENCY_FILE))?;
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let time = column(&table, "measure_time")?;
    let peer = column(&table, "peer_id")?;
    let deliver1 = column(&table, "peer1_deliver_time")?;
    let receive2 = column(&table, "peer2_receive_time")?;
    let deliver2 = column(&table, "peer2_deliver_time")?;
    let receive1 = column(&table, "peer1_receive_time")?;

    let mut rows = Vec::with_capacity(table.len());
    for record in &table.rows {
        let outbound = elapsed_seconds(&record[receive2], &record[deliver1])?;
        let inbound = elapsed_seconds(&record[receive1], &record[deliver2])?;
        let seconds = (outbound + inbound) / 2.0;
        if seconds < 0.0 {
            continue;
        }
        rows.push(P2pLatencyRow {
            measure_time: record[time].clone(),
            peer_id: record[peer].clone(),
            seconds,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn latency_averages_both_directions_and_drops_negatives() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(LATENCY_FILE)).unwrap();
        file.write_all(
            b"measure_time,peer_id,peer1_deliver_time,peer2_receive_time,peer2_deliver_time,peer1_receive_time\n\
              2024-01-01 10:00:00.000000,0xdeadbeef01,2024-01-01 10:00:00.000000,2024-01-01 10:00:00.030000,2024-01-01 10:00:00.040000,2024-01-01 10:00:00.050000\n\
              2024-01-01 10:00:01.000000,0xdeadbeef01,2024-01-01 10:00:01.000000,2024-01-01 10:00:00.000000,2024-01-01 10:00:01.000000,2024-01-01 10:00:00.000000\n",
        )
        .unwrap();

        let rows = p2p_latency_rows(dir.path()).unwrap();
        // Second record is a clock anomaly (both directions negative) and is
        // dropped; the first averages 30ms and 10ms to 20ms.
        assert_eq!(rows.len(), 1);
        assert!((rows[0].seconds - 0.02).abs() < 1e-9);
    }

    #[test]
    fn empty_log_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LATENCY_FILE),
            "measure_time,peer_id,peer1_deliver_time,peer2_receive_time,peer2_deliver_time,peer1_receive_time\n",
        )
        .unwrap();
        assert!(p2p_latency_rows(dir.path()).unwrap().is_empty());
    }
}

//! Network layer metrics: P2P transmission latency and message throughput.

use std::path::Path;

use tracing::info;

use logfile::write_series;
use primitives::{time::SECOND_PRECISION, timestamp_micros};

use crate::{
    MetricError, TransformOptions,
    aggregate::{bucket_mean, bucket_sum, retain_non_negative},
    column, load_metric_table,
};

const LATENCY_FILE: &str = "net_p2p_transmission_latency.csv";
const LATENCY_COLUMNS: [&str; 6] = [
    "measure_time",
    "peer_id",
    "peer1_deliver_time",
    "peer2_receive_time",
    "peer2_deliver_time",
    "peer1_receive_time",
];

const THROUGHPUT_FILE: &str = "peer_message_throughput.csv";
const THROUGHPUT_COLUMNS: [&str; 3] = ["measure_time", "message_type", "message_size"];

/// Length of the placeholder peer id the probe writes before the handshake
/// has resolved the remote identity; such rows carry no usable timestamps.
const PLACEHOLDER_PEER_ID_LEN: usize = 7;

/// Mean one-way transmission latency between two peers, in milliseconds.
///
/// Every row carries the four timestamps of a round trip; the latency is
/// `((t2 + t4) - (t1 + t3)) / 2` computed on microsecond timestamps, i.e.
/// half the round trip net of the remote turnaround.
pub fn net_p2p_transmission_latency(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let table = load_metric_table(&input_dir.join(LATENCY_FILE), &LATENCY_COLUMNS, opts)?;
    let time = column(&table, "measure_time")?;
    let peer = column(&table, "peer_id")?;
    let deliver1 = column(&table, "peer1_deliver_time")?;
    let receive2 = column(&table, "peer2_receive_time")?;
    let deliver2 = column(&table, "peer2_deliver_time")?;
    let receive1 = column(&table, "peer1_receive_time")?;

    let mut samples = Vec::with_capacity(table.len());
    for row in &table.rows {
        if row[peer].len() == PLACEHOLDER_PEER_ID_LEN {
            continue;
        }
        let t1 = timestamp_micros(&row[deliver1])?;
        let t2 = timestamp_micros(&row[receive2])?;
        let t3 = timestamp_micros(&row[deliver2])?;
        let t4 = timestamp_micros(&row[receive1])?;
        let latency_ms = ((t2 + t4) - (t1 + t3)) as f64 / 2000.0;
        samples.push((row[time].clone(), latency_ms));
    }

    retain_non_negative(&mut samples);
    let series = bucket_mean(samples, SECOND_PRECISION);
    write_series(
        output_dir.join("net_p2p_transmission_latency_result.csv"),
        "net_p2p_transmission_latency",
        series,
    )?;
    info!(metric = "net_p2p_transmission_latency", "transform finished");
    Ok(())
}

/// Total message bytes the node exchanged per second.
///
/// The input is grouped through an ordered map rather than a single linear
/// pass, so a log that is not perfectly time-ordered still sums correctly.
pub fn peer_message_throughput(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    let mut table = load_metric_table(&input_dir.join(THROUGHPUT_FILE), &THROUGHPUT_COLUMNS, opts)?;
    table.drop_column("message_type");
    let time = column(&table, "measure_time")?;
    let size = column(&table, "message_size")?;

    let mut samples: Vec<(String, f64)> = table
        .rows
        .iter()
        .map(|row| (row[time].clone(), row[size].parse::<f64>().unwrap_or(f64::NAN)))
        .collect();
    retain_non_negative(&mut samples);

    let series = bucket_sum(samples, SECOND_PRECISION);
    write_series(
        output_dir.join("peer_message_throughput_result.csv"),
        "peer_message_throughput",
        series,
    )?;
    info!(metric = "peer_message_throughput", "transform finished");
    Ok(())
}

//! The offline batch job: run every transform, then merge the results.

use std::path::Path;

use tracing::{error, info};

use crate::{
    MetricError, Transform, TransformOptions, block, consensus, contract,
    merge::{MergeInput, merge_outer, write_summary},
    network, storage, txpool,
};

/// File name of the merged summary table.
pub const SUMMARY_FILE: &str = "res.csv";

/// Every transform with its result file and summary column label, in
/// instrumentation-layer order: tx pool, network, storage, block lifecycle,
/// consensus, contract.
const METRICS: [(&str, Transform, &str, &str); 13] = [
    (
        "transaction_pool_input_throughput",
        txpool::transaction_pool_input_throughput as Transform,
        "transaction_pool_input_throughput_result.csv",
        "tx pool input throughput",
    ),
    (
        "net_p2p_transmission_latency",
        network::net_p2p_transmission_latency as Transform,
        "net_p2p_transmission_latency_result.csv",
        "p2p transmission latency",
    ),
    (
        "peer_message_throughput",
        network::peer_message_throughput as Transform,
        "peer_message_throughput_result.csv",
        "peer message throughput",
    ),
    (
        "db_state_write_rate",
        storage::db_state_write_rate as Transform,
        "db_state_write_rate_result.csv",
        "db state write rate",
    ),
    (
        "db_state_read_rate",
        storage::db_state_read_rate as Transform,
        "db_state_read_rate_result.csv",
        "db state read rate",
    ),
    (
        "tx_queue_delay",
        txpool::tx_queue_delay as Transform,
        "tx_queue_delay_result.csv",
        "tx queue delay",
    ),
    (
        "block_commit_duration",
        block::block_commit_duration as Transform,
        "block_commit_duration_result.csv",
        "block commit duration",
    ),
    (
        "tx_in_block_tps",
        block::tx_in_block_tps as Transform,
        "tx_in_block_tps_result.csv",
        "tx in block tps",
    ),
    (
        "block_validation_efficiency",
        block::block_validation_efficiency as Transform,
        "block_validation_efficiency_result.csv",
        "block validation efficiency",
    ),
    ("tx_delay", block::tx_delay as Transform, "tx_delay_result.csv", "tx confirm delay"),
    (
        "consensus_clique_cost",
        consensus::consensus_clique_cost as Transform,
        "consensus_clique_cost_result.csv",
        "clique round cost",
    ),
    (
        "block_tx_conflict_rate",
        contract::block_tx_conflict_rate as Transform,
        "block_tx_conflict_rate_result.csv",
        "block tx conflict rate",
    ),
    (
        "contract_time",
        contract::contract_time as Transform,
        "contract_time_result.csv",
        "contract exec time",
    ),
];

/// Run every metric transform against `input_dir`, isolating per-metric
/// failures, then outer-join whatever result series were produced into
/// [`SUMMARY_FILE`] under `output_dir`.
///
/// A transform failure (missing input file, schema mismatch, broken
/// correlation) is logged and the remaining metrics still run; only the
/// series that were actually written take part in the merge.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    opts: &TransformOptions,
) -> Result<(), MetricError> {
    for (name, transform, _, _) in METRICS {
        if let Err(err) = transform(input_dir, output_dir, opts) {
            error!(metric = name, %err, "transform failed, continuing with remaining metrics");
        }
    }

    let inputs: Vec<MergeInput> = METRICS
        .iter()
        .filter_map(|(_, _, result_file, label)| {
            let path = output_dir.join(result_file);
            path.exists().then(|| MergeInput {
                path,
                label: (*label).to_owned(),
                preprocess: false,
            })
        })
        .collect();

    if inputs.is_empty() {
        info!("no result series produced, skipping summary");
        return Ok(());
    }

    let summary = merge_outer(&inputs)?;
    write_summary(output_dir.join(SUMMARY_FILE), summary)?;
    info!(merged = inputs.len(), "batch finished");
    Ok(())
}

//! Row types returned by the live query surface.
//!
//! These structs define the data the dashboard frontend renders. They live
//! apart from the query functions so a consumer can depend on the shapes
//! without pulling in the log-reading machinery.

#![allow(missing_docs)]

use serde::Serialize;

/// Aggregate view of the transaction pool input log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxpoolInputSummary {
    pub tx_count: u64,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: f64,
    pub throughput: f64,
    /// Transactions submitted via the local IPC endpoint.
    pub local_count: u64,
    /// Transactions submitted via RPC.
    pub rpc_count: u64,
}

/// One P2P round-trip measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct P2pLatencyRow {
    pub measure_time: String,
    pub peer_id: String,
    pub seconds: f64,
}

/// One state-write measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbWriteRow {
    pub block_height: String,
    pub block_hash: String,
    pub seconds: f64,
}

/// One state-read measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbReadRow {
    pub measure_time: String,
    pub block_hash: String,
    pub seconds: f64,
}

/// Cost of one Clique consensus round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliqueCostRow {
    pub block_height: String,
    pub seconds: f64,
}

/// Execution time of one contract call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractExecRow {
    pub tx_hash: String,
    pub contract_addr: String,
    pub start_time: String,
    pub seconds: f64,
}

/// Pool-entry-to-confirmation delay of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxDelayRow {
    pub tx_hash: String,
    pub block_height: String,
    pub start_time: String,
    pub seconds: f64,
}

/// Pool queueing span of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxQueueRow {
    pub tx_hash: String,
    pub enter_time: String,
    pub exit_time: String,
    pub seconds: f64,
}

/// Send-to-commit span of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockCommitRow {
    pub block_height: String,
    pub block_hash: String,
    pub block_tx_count: String,
    pub seconds: f64,
}

/// In-block transaction throughput of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockTpsRow {
    pub block_height: String,
    pub block_txsroot: String,
    pub duration_seconds: f64,
    pub tps: f64,
}

/// Validation efficiency of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRow {
    pub block_hash: String,
    pub block_tx_count: String,
    pub duration_seconds: f64,
    pub efficiency: f64,
}

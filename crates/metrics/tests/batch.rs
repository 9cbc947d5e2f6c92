//! End-to-end batch runs over a synthetic log directory.

use std::io::Write;

use logfile::read_table;
use metrics::{
    TransformOptions,
    batch::{SUMMARY_FILE, run_batch},
};
use pretty_assertions::assert_eq;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) {
    let mut file = std::fs::File::create(dir.path().join(name)).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

#[test]
fn batch_continues_past_missing_inputs_and_merges_the_rest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // Only three of the thirteen metrics have input files.
    write_file(
        &input,
        "transaction_pool_input_throughput.csv",
        "measure_time,tx_id,source\n\
         2024-01-01 10:00:00.100000,0xaa,1\n\
         2024-01-01 10:00:00.600000,0xbb,2\n",
    );
    write_file(
        &input,
        "block_commit_duration_start.csv",
        "measure_time,block_height\n2024-01-01 10:00:00.000000,100\n",
    );
    write_file(
        &input,
        "block_commit_duration_end.csv",
        "measure_time,block_height,block_hash,block_tx_count\n\
         2024-01-01 10:00:02.500000,100,0xabc,5\n",
    );
    write_file(
        &input,
        "consensus_clique_cost.csv",
        "block_height,clique_start,clique_end,cost_time\n\
         100,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000,250ms\n",
    );

    run_batch(input.path(), output.path(), &TransformOptions::default()).unwrap();

    // The block commit series carries the expected bucket and duration.
    let commit = read_table(output.path().join("block_commit_duration_result.csv")).unwrap();
    assert_eq!(commit.rows, vec![vec!["2024-01-01 10:00:00", "2.5"]]);

    // tx_in_block_tps shares the commit input files, so four series exist in
    // total and the summary holds one column per produced series.
    let summary = read_table(output.path().join(SUMMARY_FILE)).unwrap();
    assert_eq!(
        summary.columns,
        vec![
            "measure_time",
            "tx pool input throughput",
            "block commit duration",
            "tx in block tps",
            "clique round cost",
        ]
    );

    // Colons in the time key are rewritten and absent metrics leave empty
    // cells (outer join, not inner). The tps series is keyed by the commit
    // time, so it lands in the later bucket together with the clique cost.
    assert_eq!(
        summary.rows,
        vec![
            vec!["2024-01-01 10-00-00", "2", "2.5", "", ""],
            vec!["2024-01-01 10-00-02", "", "", "2000000", "0.25"],
        ]
    );
}

#[test]
fn batch_with_no_inputs_writes_no_summary() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    run_batch(input.path(), output.path(), &TransformOptions::default()).unwrap();
    assert!(!output.path().join(SUMMARY_FILE).exists());
}

#[test]
fn schema_mismatch_in_one_metric_does_not_stop_the_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    // Wrong header for the pool throughput file, valid clique file.
    write_file(
        &input,
        "transaction_pool_input_throughput.csv",
        "time,tx,src\n2024-01-01 10:00:00.100000,0xaa,1\n",
    );
    write_file(
        &input,
        "consensus_clique_cost.csv",
        "block_height,clique_start,clique_end,cost_time\n\
         100,2024-01-01 10:00:00.000000,2024-01-01 10:00:02.000000,250ms\n",
    );

    run_batch(input.path(), output.path(), &TransformOptions::default()).unwrap();

    assert!(!output.path().join("transaction_pool_input_throughput_result.csv").exists());
    let summary = read_table(output.path().join(SUMMARY_FILE)).unwrap();
    assert_eq!(summary.columns, vec!["measure_time", "clique round cost"]);
}

//! Outer-join merging of result series into the summary table.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use logfile::{MEASURE_TIME, Table, read_table, write_table};
use primitives::time::SECOND_PRECISION;

use crate::{MetricError, aggregate::bucket_mean, column};

/// One result series to fold into the summary table.
#[derive(Debug, Clone)]
pub struct MergeInput {
    /// Path of the `<metric>_result.csv` file.
    pub path: PathBuf,
    /// Column label carried into the summary table.
    pub label: String,
    /// Re-bucket the series to second precision before joining, for series
    /// that are not already second-bucketed.
    pub preprocess: bool,
}

/// Outer-join the given series on their bucket key.
///
/// Row inclusion is independent of the input order; only the column order
/// follows it. A bucket missing a metric carries an empty cell for it.
pub fn merge_outer(inputs: &[MergeInput]) -> Result<Table, MetricError> {
    let mut columns = vec![MEASURE_TIME.to_owned()];
    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (metric_index, input) in inputs.iter().enumerate() {
        columns.push(input.label.clone());
        for (key, value) in load_series(input)? {
            let row =
                merged.entry(key).or_insert_with(|| vec![String::new(); inputs.len()]);
            row[metric_index] = value;
        }
    }

    let rows = merged
        .into_iter()
        .map(|(key, values)| {
            let mut row = vec![key];
            row.extend(values);
            row
        })
        .collect();
    Ok(Table::new(columns, rows))
}

/// Write the merged summary, rewriting timestamp colons to hyphens so the
/// time key survives tools that mangle `:` in cell values.
pub fn write_summary<P: AsRef<Path>>(path: P, mut table: Table) -> Result<(), MetricError> {
    if let Some(time) = table.column_index(MEASURE_TIME) {
        for row in &mut table.rows {
            row[time] = row[time].replace(':', "-");
        }
    }
    write_table(path, &table)?;
    Ok(())
}

fn load_series(input: &MergeInput) -> Result<Vec<(String, String)>, MetricError> {
    let table = read_table(&input.path)?;
    let time = column(&table, MEASURE_TIME)?;
    let value = (0..table.columns.len())
        .find(|index| *index != time)
        .ok_or_else(|| MetricError::MissingColumn("value".to_owned()))?;

    if input.preprocess {
        let samples = table
            .rows
            .iter()
            .map(|row| (row[time].clone(), row[value].parse().unwrap_or(f64::NAN)))
            .collect();
        Ok(bucket_mean(samples, SECOND_PRECISION)
            .into_iter()
            .map(|(key, mean)| (key, mean.to_string()))
            .collect())
    } else {
        Ok(table.rows.iter().map(|row| (row[time].clone(), row[value].clone())).collect())
    }
}

use std::{fmt::Display, path::Path};

use crate::{error::LogFileError, table::Table};

/// Column name shared by every result series' time axis.
pub const MEASURE_TIME: &str = "measure_time";

/// Write a derived metric series as a two-column CSV: the bucketed
/// `measure_time` and the named value column.
pub fn write_series<P, I, V>(path: P, value_column: &str, series: I) -> Result<(), LogFileError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (String, V)>,
    V: Display,
{
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([MEASURE_TIME, value_column])?;
    for (time, value) in series {
        writer.write_record([time, value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a full table, header first.
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<(), LogFileError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

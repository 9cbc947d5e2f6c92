use logfile::{LogFileError, SchemaError};
use primitives::TimeFormatError;
use thiserror::Error;

/// Errors raised by a metric transform. A failure aborts that metric's run
/// only; the batch driver carries on with the remaining metrics.
#[derive(Debug, Error)]
pub enum MetricError {
    /// Reading or writing a log file failed.
    #[error(transparent)]
    LogFile(#[from] LogFileError),
    /// The input file's columns do not match the metric's schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A timestamp in the input could not be parsed.
    #[error(transparent)]
    Time(#[from] TimeFormatError),
    /// The in/out alternation of a tx-hash group is broken.
    #[error("unmatched in and out for tx {tx_hash}")]
    Correlation {
        /// Transaction hash of the offending group.
        tx_hash: String,
    },
    /// A column required by the transform is absent after validation.
    #[error("column `{0}` missing")]
    MissingColumn(String),
}

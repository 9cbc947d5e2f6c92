//! Live query surface for the Gethscope dashboard.
//!
//! Every function reads the relevant log files fresh from disk and returns
//! typed rows the presentation layer renders verbatim; there is no cache
//! and no shared state, so repeated requests are idempotent. An empty row
//! vector means "no data yet" and the frontend shows its placeholder.

/// Consensus layer panels
pub mod consensus;
/// Contract layer panels
pub mod contract;
/// Shared lookup and display helpers
pub mod helpers;
/// Transaction lifecycle panels
pub mod lifecycle;
/// Row types returned to the presentation layer
pub mod models;
/// Network layer panels
pub mod network;
/// State database panels
pub mod storage;
/// Transaction pool panels
pub mod txpool;

use logfile::LogFileError;
use primitives::TimeFormatError;
use thiserror::Error;

pub use helpers::shorten_id;
// The four entry points the presentation layer consumes directly.
pub use logfile::read_table;
pub use primitives::{build_cdf, elapsed_seconds, normalize_duration};

/// Errors raised while assembling a dashboard panel's data.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Reading a log file failed.
    #[error(transparent)]
    LogFile(#[from] LogFileError),
    /// A timestamp in the log could not be parsed.
    #[error(transparent)]
    Time(#[from] TimeFormatError),
    /// A column the panel needs is absent from the file.
    #[error("column `{0}` missing")]
    MissingColumn(String),
}

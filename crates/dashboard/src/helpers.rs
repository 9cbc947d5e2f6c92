//! Shared lookup and display helpers for the panel queries.

use logfile::Table;

use crate::DashboardError;

/// Shorten a hash or node id for display: `0x` plus the first eight hex
/// characters and an ellipsis.
pub fn shorten_id(id: &str) -> String {
    let hex = id.strip_prefix("0x").unwrap_or(id);
    let end = hex.char_indices().nth(8).map_or(hex.len(), |(i, _)| i);
    format!("0x{}...", &hex[..end])
}

pub(crate) fn column(table: &Table, name: &str) -> Result<usize, DashboardError> {
    table.column_index(name).ok_or_else(|| DashboardError::MissingColumn(name.to_owned()))
}

//! Error types.

use thiserror::Error;

/// Errors raised when building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("cell span must cover at least one column and one row (got {columns}x{rows})")]
    EmptySpan { columns: u32, rows: u32 },
}

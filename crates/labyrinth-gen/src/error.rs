//! Error types for labyrinth-gen.

use thiserror::Error;

/// Result type for generator construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before a generator starts producing pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Row count outside what the generator accepts.
    #[error("rows must be in {min}..={max}, got {value}")]
    RowsOutOfRange { value: usize, min: usize, max: usize },

    /// Column count outside what the generator accepts.
    #[error("columns must be in {min}..={max}, got {value}")]
    ColumnsOutOfRange { value: usize, min: usize, max: usize },

    /// No generator is registered under this name.
    #[error("there is no generator named {0:?}")]
    UnknownGenerator(String),
}

pub(crate) fn check_dimensions(rows: usize, cols: usize, min: usize) -> Result<()> {
    use labyrinth_grid::{MAX_COLUMNS, MAX_ROWS};

    if !(min..=MAX_ROWS).contains(&rows) {
        return Err(Error::RowsOutOfRange { value: rows, min, max: MAX_ROWS });
    }
    if !(min..=MAX_COLUMNS).contains(&cols) {
        return Err(Error::ColumnsOutOfRange { value: cols, min, max: MAX_COLUMNS });
    }
    Ok(())
}

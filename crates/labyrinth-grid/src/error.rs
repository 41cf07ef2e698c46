//! Error types for labyrinth-grid.

use thiserror::Error;

use crate::CellId;

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or editing a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Row count outside the configured bounds.
    #[error("rows must be in {min}..={max}, got {value}")]
    RowsOutOfRange { value: usize, min: usize, max: usize },

    /// Column count outside the configured bounds.
    #[error("columns must be in {min}..={max}, got {value}")]
    ColumnsOutOfRange { value: usize, min: usize, max: usize },

    /// Cell edges must have positive, finite length.
    #[error("edge length must be positive, got {0}")]
    NonPositiveEdgeLength(f64),

    /// Two cells being joined have a different number of walls.
    #[error("wall count mismatch: {first} vs {second}")]
    WallCountMismatch { first: usize, second: usize },

    /// A referenced cell id is not part of the grid.
    #[error("cell not found: {0}")]
    CellNotFound(CellId),

    /// An open wall is shared by more than two cells.
    #[error("open wall {wall} is shared by {count} cells")]
    TooManyWallOwners { wall: String, count: usize },
}

//! Error types for labyrinth-solve.

use labyrinth_grid::CellId;
use thiserror::Error;

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while searching a maze.
///
/// Every variant except [`Error::Unreachable`] means the maze data is
/// inconsistent with what the solver was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An id the search needed is not in the maze.
    #[error("cell {0} is not in the maze")]
    CellNotFound(CellId),

    /// A cell reached by the search has no open neighbour.
    #[error("cell {0} has no open neighbour")]
    IsolatedCell(CellId),

    /// The predecessor chain stops before reaching the start.
    #[error("no predecessor recorded for cell {0}")]
    BrokenPath(CellId),

    /// The search ran out of cells before reaching the end.
    #[error("no path from {start} to {end}")]
    Unreachable { start: CellId, end: CellId },

    /// A cell has no walls, so it has no centre to measure from.
    #[error("cell {0} has no geometry")]
    NoGeometry(CellId),

    /// No solver is registered under this id or name.
    #[error("there is no solver {0:?}")]
    UnknownSolver(String),

    /// No heuristic has this name.
    #[error("there is no heuristic named {0:?}")]
    UnknownHeuristic(String),
}
